//! Configuration for Edge read-aloud synthesis.

use std::time::Duration;

use url::Url;

/// Read-aloud synthesis WebSocket endpoint.
pub const EDGE_TTS_URL: &str =
    "wss://speech.platform.bing.com/consumer/speech/synthesize/readaloud/edge/v1";

/// Public token embedded in the Edge browser.
pub const TRUSTED_CLIENT_TOKEN: &str = "6A5AA1D4EAFF4E9FB37E23D68491D6F4";

/// Browser version advertised alongside the `Sec-MS-GEC` token.
pub const SEC_MS_GEC_VERSION: &str = "1-130.0.2849.68";

pub const EDGE_ORIGIN: &str = "chrome-extension://jdiccldimpdaibmpdkjnbmckianbfold";

pub const EDGE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36 Edg/130.0.0.0";

pub const OUTPUT_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";

#[derive(Debug, Clone)]
pub struct EdgeTTSConfig {
    pub endpoint: String,
    /// Short voice name, e.g. `en-US-AnaNeural`
    pub voice: String,
    pub rate: String,
    pub pitch: String,
    pub volume: String,
    /// Upper bound for connect plus the whole synthesis exchange
    pub timeout: Duration,
}

impl Default for EdgeTTSConfig {
    fn default() -> Self {
        Self {
            endpoint: EDGE_TTS_URL.to_string(),
            voice: "en-US-AnaNeural".to_string(),
            rate: "+10%".to_string(),
            pitch: "+0Hz".to_string(),
            volume: "+0%".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl EdgeTTSConfig {
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| format!("Invalid Edge TTS endpoint '{}': {e}", self.endpoint))?;
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(format!(
                "Edge TTS endpoint must be ws:// or wss://, got '{}'",
                self.endpoint
            ));
        }
        if self.voice_name().is_none() {
            return Err(format!(
                "Voice '{}' is not of the form <lang>-<REGION>-<Name>",
                self.voice
            ));
        }
        Ok(())
    }

    /// Full service voice name.
    ///
    /// `en-US-AnaNeural` becomes
    /// `Microsoft Server Speech Text to Speech Voice (en-US, AnaNeural)`.
    /// Names already in the long form are returned as is.
    pub fn voice_name(&self) -> Option<String> {
        let voice = self.voice.trim();
        if voice.starts_with("Microsoft Server Speech") {
            return Some(voice.to_string());
        }

        let (locale, name) = voice.rsplit_once('-')?;
        if name.is_empty() || !locale.contains('-') {
            return None;
        }
        Some(format!(
            "Microsoft Server Speech Text to Speech Voice ({locale}, {name})"
        ))
    }

    /// Connection URL carrying the client token, the time-based `Sec-MS-GEC`
    /// token and a fresh connection id.
    pub fn connection_url(&self, sec_ms_gec: &str, connection_id: &str) -> Result<Url, String> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| format!("Invalid Edge TTS endpoint '{}': {e}", self.endpoint))?;
        url.query_pairs_mut()
            .append_pair("TrustedClientToken", TRUSTED_CLIENT_TOKEN)
            .append_pair("Sec-MS-GEC", sec_ms_gec)
            .append_pair("Sec-MS-GEC-Version", SEC_MS_GEC_VERSION)
            .append_pair("ConnectionId", connection_id);
        Ok(url)
    }
}
