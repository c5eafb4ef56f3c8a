//! `encoding_rs` implementation of the decoder capability.

use std::fmt;

use encoding_rs::{Decoder, DecoderResult, Encoding, EncoderResult};

use super::{Codec, CodePoint, ConvertError, Conversion, Reencode};
use crate::error::IpmError;

/// Decoder capability backed by the WHATWG Encoding Standard.
///
/// Labels are matched case-insensitively against the WHATWG label table, so
/// `UTF-8`, `utf8`, `latin1`, `Shift_JIS` and `koi8-r` are all accepted.
/// Labels that resolve to the `replacement` encoding are rejected, since
/// that decoder maps every input to a substitute character.
///
/// # Example
///
/// ```
/// use ipmrs::{Codec, Conversion, WhatwgCodec};
///
/// let mut decoder = WhatwgCodec.open_decoder("windows-1252")?;
/// let mut out = Vec::new();
/// decoder.convert(b"caf\xE9", &mut out, true)?;
/// assert_eq!(out, vec!['c', 'a', 'f', 'é']);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WhatwgCodec;

impl WhatwgCodec {
    fn lookup(label: &str) -> Result<&'static Encoding, IpmError> {
        Encoding::for_label_no_replacement(label.as_bytes()).ok_or_else(|| {
            IpmError::UnsupportedEncoding {
                label: label.to_string(),
            }
        })
    }
}

impl Codec for WhatwgCodec {
    type Decoder = WhatwgDecoder;
    type Encoder = WhatwgEncoder;

    fn open_decoder(&self, label: &str) -> Result<WhatwgDecoder, IpmError> {
        let encoding = Self::lookup(label)?;
        Ok(WhatwgDecoder {
            // A byte order mark is a character like any other
            inner: encoding.new_decoder_without_bom_handling(),
            text: String::new(),
            finished: false,
        })
    }

    fn open_encoder(&self, label: &str) -> Result<WhatwgEncoder, IpmError> {
        let encoding = Self::lookup(label)?;
        if encoding.output_encoding() != encoding {
            return Err(IpmError::DecoderOpen {
                label: label.to_string(),
                message: format!(
                    "{} output is produced as {}",
                    encoding.name(),
                    encoding.output_encoding().name()
                ),
            });
        }
        Ok(WhatwgEncoder {
            encoding,
            encoded: 0,
        })
    }
}

/// Streaming conversion from a WHATWG encoding to code points.
///
/// Incomplete trailing sequences are buffered inside the decoder, so every
/// call consumes all of its input.
pub struct WhatwgDecoder {
    inner: Decoder,
    text: String,
    finished: bool,
}

impl WhatwgDecoder {
    /// Returns the canonical name of the source encoding.
    pub fn encoding_name(&self) -> &'static str {
        self.inner.encoding().name()
    }
}

impl fmt::Debug for WhatwgDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhatwgDecoder")
            .field("encoding", &self.encoding_name())
            .field("finished", &self.finished)
            .finish()
    }
}

impl Conversion for WhatwgDecoder {
    fn convert(
        &mut self,
        input: &[u8],
        output: &mut Vec<CodePoint>,
        last: bool,
    ) -> Result<usize, ConvertError> {
        if self.finished {
            return Err(ConvertError::Finished);
        }

        let needed = self
            .inner
            .max_utf8_buffer_length_without_replacement(input.len())
            .ok_or(ConvertError::Capacity)?;
        self.text.clear();
        self.text.reserve(needed);

        let (result, read) =
            self.inner
                .decode_to_string_without_replacement(input, &mut self.text, last);

        match result {
            DecoderResult::InputEmpty => {}
            DecoderResult::OutputFull => return Err(ConvertError::Capacity),
            // Nothing new arrived, so the decoder choked on bytes it had
            // been holding back from earlier calls.
            DecoderResult::Malformed(bad, _) if last && input.is_empty() => {
                return Err(ConvertError::Incomplete {
                    remaining: usize::from(bad),
                });
            }
            DecoderResult::Malformed(bad, good) => {
                let (bad, good) = (usize::from(bad), usize::from(good));
                return Err(ConvertError::InvalidSequence {
                    at: read.saturating_sub(bad + good),
                    len: bad,
                });
            }
        }

        output.extend(self.text.chars());
        self.finished = last;
        Ok(read)
    }

    fn close(self) -> Result<(), ConvertError> {
        if !self.finished {
            return Err(ConvertError::Close(format!(
                "{} decoder closed before end of stream",
                self.encoding_name()
            )));
        }
        Ok(())
    }
}

/// Conversion from code points to a WHATWG encoding.
///
/// Every code point is encoded on its own with a fresh encoder, so stateful
/// encodings such as ISO-2022-JP always yield a self-contained sequence.
#[derive(Debug)]
pub struct WhatwgEncoder {
    encoding: &'static Encoding,
    encoded: u64,
}

impl WhatwgEncoder {
    /// Returns the canonical name of the target encoding.
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Returns how many code points have been encoded.
    pub fn encoded(&self) -> u64 {
        self.encoded
    }
}

impl Reencode for WhatwgEncoder {
    fn encode(&mut self, code_point: CodePoint, output: &mut Vec<u8>) -> Result<(), ConvertError> {
        let mut encoder = self.encoding.new_encoder();
        let mut utf8 = [0u8; 4];
        let src: &str = code_point.encode_utf8(&mut utf8);

        let needed = encoder
            .max_buffer_length_from_utf8_without_replacement(src.len())
            .ok_or(ConvertError::Capacity)?;
        let start = output.len();
        output.resize(start + needed, 0);

        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(src, &mut output[start..], true);

        match result {
            EncoderResult::InputEmpty if read == src.len() => {
                output.truncate(start + written);
                self.encoded += 1;
                Ok(())
            }
            EncoderResult::InputEmpty => {
                output.truncate(start);
                Err(ConvertError::Incomplete {
                    remaining: src.len() - read,
                })
            }
            EncoderResult::Unmappable(_) => {
                output.truncate(start);
                Err(ConvertError::Lossy { count: 1 })
            }
            EncoderResult::OutputFull => {
                output.truncate(start);
                Err(ConvertError::Capacity)
            }
        }
    }
}
