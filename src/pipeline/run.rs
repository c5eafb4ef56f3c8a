//! The single-pass read -> decode -> count loop and the final reduction.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::codec::{Codec, CodePoint, Conversion, INTERNAL_ENCODING, Reencode, WhatwgCodec};
use crate::config::IpmConfig;
use crate::decoder::IncrementalDecoder;
use crate::display::render_occurrences;
use crate::error::IpmError;
use crate::occurrence::OccurrenceTable;
use crate::reader::ByteReader;
use crate::reduce::Ipm;

use super::IpmReport;

/// Computes the IPM of the file at `path`.
///
/// The file is decoded with the built-in [`WhatwgCodec`] according to
/// `config`, one chunk at a time.
///
/// # Errors
///
/// Fails fast with the first [`IpmError`] of any stage. A path that exists
/// but is not a regular file is reported as [`IpmError::FileOpen`].
///
/// # Example
///
/// ```no_run
/// use ipmrs::{compute_ipm, IpmConfig};
///
/// let report = compute_ipm("book.txt", &IpmConfig::default())?;
/// println!("{} ({})", report.ipm, report.ipm.float_display());
/// # Ok::<(), ipmrs::IpmError>(())
/// ```
pub fn compute_ipm(path: impl AsRef<Path>, config: &IpmConfig) -> Result<IpmReport, IpmError> {
    let path = path.as_ref();
    config.validate()?;

    let open_error = |source| IpmError::FileOpen {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(open_error)?;
    let metadata = file.metadata().map_err(open_error)?;
    if !metadata.is_file() {
        return Err(open_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }

    info!(path = %path.display(), size = metadata.len(), "opened input file");
    compute_ipm_with(file, &WhatwgCodec, config)
}

/// Computes the IPM of everything `reader` yields, decoding with `codec`.
///
/// This is the generic form of [`compute_ipm`] for injected decoder
/// capabilities and in-memory input.
///
/// # Example
///
/// ```
/// use ipmrs::{compute_ipm_with, IpmConfig, WhatwgCodec};
/// use std::io::Cursor;
///
/// let report = compute_ipm_with(Cursor::new("aabb"), &WhatwgCodec, &IpmConfig::default())?;
/// assert_eq!(report.fraction(), (3, 1));
/// # Ok::<(), ipmrs::IpmError>(())
/// ```
pub fn compute_ipm_with<R, C>(reader: R, codec: &C, config: &IpmConfig) -> Result<IpmReport, IpmError>
where
    R: Read,
    C: Codec,
{
    config.validate()?;

    let conversion = codec.open_decoder(config.source_encoding())?;
    info!(
        source = config.source_encoding(),
        internal = INTERNAL_ENCODING,
        capacity = config.read_capacity(),
        "computing the IPM"
    );

    let (table, bytes_read) = stream(reader, conversion, config.read_capacity())?;
    info!(
        bytes = bytes_read,
        total = table.total(),
        alphabet = table.alphabet_size(),
        "successfully counted"
    );

    let occurrences = if config.show_occurrences() {
        let mut encoder = codec.open_encoder(config.display_encoding())?;
        let lines = render_occurrences(&mut encoder, &table)?;
        encoder.close().map_err(|e| {
            warn!(target_encoding = config.display_encoding(), "display encoder release failed: {e}");
            IpmError::ResourceRelease {
                message: e.to_string(),
            }
        })?;
        Some(lines)
    } else {
        None
    };

    let ipm = Ipm::from_table(&table)?;
    info!(fraction = %ipm, float = %ipm.float_display(), "computed the IPM");

    Ok(IpmReport {
        source_encoding: config.source_encoding().to_string(),
        bytes_read,
        total: table.total(),
        alphabet_size: table.alphabet_size(),
        ipm,
        occurrences,
    })
}

/// Reads, decodes and counts `reader` to the end.
///
/// `conversion` is used for the whole stream and closed afterwards. At most
/// one chunk of `capacity` bytes and its decoded code points are held at a
/// time.
///
/// # Example
///
/// ```
/// use ipmrs::{count_occurrences, Codec, WhatwgCodec};
///
/// let conversion = WhatwgCodec.open_decoder("UTF-8")?;
/// let table = count_occurrences("héhé".as_bytes(), conversion, 3)?;
/// assert_eq!(table.count('é'), 2);
/// # Ok::<(), ipmrs::IpmError>(())
/// ```
pub fn count_occurrences<R, D>(reader: R, conversion: D, capacity: usize) -> Result<OccurrenceTable, IpmError>
where
    R: Read,
    D: Conversion,
{
    stream(reader, conversion, capacity).map(|(table, _)| table)
}

fn stream<R, D>(reader: R, conversion: D, capacity: usize) -> Result<(OccurrenceTable, u64), IpmError>
where
    R: Read,
    D: Conversion,
{
    let mut chunks = ByteReader::new(reader, capacity);
    let mut decoder = IncrementalDecoder::new(conversion);
    let mut table = OccurrenceTable::new();
    let mut code_points: Vec<CodePoint> = Vec::with_capacity(chunks.capacity());

    for chunk in chunks.by_ref() {
        let chunk = chunk?;
        code_points.clear();
        let decoded = decoder.push(&chunk, &mut code_points)?;
        table.record(&code_points)?;
        debug!(
            bytes = chunk.len(),
            code_points = decoded,
            carried = decoder.carried(),
            "folded chunk"
        );
    }

    code_points.clear();
    decoder.finish(&mut code_points)?;
    table.record(&code_points)?;
    debug_assert_eq!(table.total(), decoder.decoded());

    decoder.close().inspect_err(|e| warn!("{e}"))?;
    Ok((table, chunks.bytes_read()))
}
