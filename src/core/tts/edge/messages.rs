//! Frames exchanged with the read-aloud service.

use bytes::Bytes;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use time::macros::format_description;

use super::config::{EdgeTTSConfig, OUTPUT_FORMAT, TRUSTED_CLIENT_TOKEN};

/// Seconds between 1601-01-01 (Windows epoch) and 1970-01-01.
const WINDOWS_EPOCH_OFFSET_SECS: u64 = 11_644_473_600;

/// `Sec-MS-GEC` tokens roll every five minutes.
const SEC_MS_GEC_WINDOW_SECS: u64 = 300;

/// Compute the `Sec-MS-GEC` token for a unix timestamp.
///
/// The current time in Windows file-time ticks, rounded down to a five
/// minute window, concatenated with the trusted client token and hashed
/// with SHA-256. Uppercase hex.
pub fn sec_ms_gec(unix_secs: u64) -> String {
    let mut secs = unix_secs + WINDOWS_EPOCH_OFFSET_SECS;
    secs -= secs % SEC_MS_GEC_WINDOW_SECS;
    let ticks = secs * 10_000_000;

    let digest = Sha256::digest(format!("{ticks}{TRUSTED_CLIENT_TOKEN}").as_bytes());
    hex::encode_upper(digest)
}

/// JavaScript `Date.toString()` style timestamp in UTC, as sent in
/// `X-Timestamp` headers.
pub fn timestamp(now: OffsetDateTime) -> String {
    let format = format_description!(
        "[weekday repr:short] [month repr:short] [day] [year] [hour]:[minute]:[second] GMT+0000 (Coordinated Universal Time)"
    );
    now.to_offset(time::UtcOffset::UTC)
        .format(&format)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

/// Escape text for inclusion in SSML. Control characters the service
/// rejects are replaced with spaces.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\n' | '\r' | '\t' => escaped.push(' '),
            c if c.is_control() => escaped.push(' '),
            c => escaped.push(c),
        }
    }
    escaped
}

/// `speech.config` frame selecting the MP3 output format.
pub fn speech_config_frame(timestamp: &str) -> String {
    format!(
        "X-Timestamp:{timestamp}\r\n\
         Content-Type:application/json; charset=utf-8\r\n\
         Path:speech.config\r\n\r\n\
         {{\"context\":{{\"synthesis\":{{\"audio\":{{\"metadataoptions\":{{\
         \"sentenceBoundaryEnabled\":\"false\",\"wordBoundaryEnabled\":\"true\"}},\
         \"outputFormat\":\"{OUTPUT_FORMAT}\"}}}}}}}}\r\n"
    )
}

pub fn build_ssml(config: &EdgeTTSConfig, voice_name: &str, text: &str) -> String {
    format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='en-US'>\
         <voice name='{voice_name}'>\
         <prosody pitch='{}' rate='{}' volume='{}'>{}</prosody>\
         </voice></speak>",
        config.pitch,
        config.rate,
        config.volume,
        escape_xml(text)
    )
}

pub fn ssml_frame(request_id: &str, timestamp: &str, ssml: &str) -> String {
    format!(
        "X-RequestId:{request_id}\r\n\
         Content-Type:application/ssml+xml\r\n\
         X-Timestamp:{timestamp}Z\r\n\
         Path:ssml\r\n\r\n\
         {ssml}"
    )
}

/// A frame received from the service.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerFrame {
    /// MP3 bytes from a `Path:audio` binary frame
    Audio(Bytes),
    /// Synthesis for the request is complete
    TurnEnd,
    /// Metadata frames (`turn.start`, `audio.metadata`, `response`)
    Other(String),
}

fn header_path(headers: &str) -> Option<&str> {
    headers.split("\r\n").find_map(|line| {
        let (key, value) = line.split_once(':')?;
        (key.trim() == "Path").then(|| value.trim())
    })
}

impl ServerFrame {
    pub fn from_text(text: &str) -> Self {
        let headers = text.split("\r\n\r\n").next().unwrap_or_default();
        match header_path(headers) {
            Some("turn.end") => Self::TurnEnd,
            Some(path) => Self::Other(path.to_string()),
            None => Self::Other(String::new()),
        }
    }

    /// Parse a binary frame: `u16` big-endian header length, header, body.
    pub fn from_binary(data: Bytes) -> Result<Self, String> {
        if data.len() < 2 {
            return Err(format!("Binary frame too short: {} bytes", data.len()));
        }
        let header_len = u16::from_be_bytes([data[0], data[1]]) as usize;
        let body_start = 2 + header_len;
        if body_start > data.len() {
            return Err(format!(
                "Binary frame header length {header_len} exceeds frame size {}",
                data.len()
            ));
        }

        let headers = std::str::from_utf8(&data[2..body_start])
            .map_err(|e| format!("Binary frame header is not UTF-8: {e}"))?;

        match header_path(headers) {
            Some("audio") => Ok(Self::Audio(data.slice(body_start..))),
            Some(path) => Ok(Self::Other(path.to_string())),
            None => Err("Binary frame has no Path header".to_string()),
        }
    }
}
