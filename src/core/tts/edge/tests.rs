use super::messages::{build_ssml, speech_config_frame, ssml_frame, timestamp};
use super::*;
use crate::core::tts::{BaseTTS, TTSError};
use bytes::Bytes;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use time::OffsetDateTime;
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::protocol::Message;

fn binary_frame(path: &str, body: &[u8]) -> Bytes {
    let header = format!("X-RequestId:abc\r\nContent-Type:audio/mpeg\r\nPath:{path}\r\n");
    let mut frame = (header.len() as u16).to_be_bytes().to_vec();
    frame.extend_from_slice(header.as_bytes());
    frame.extend_from_slice(body);
    Bytes::from(frame)
}

mod config_tests {
    use super::*;

    #[test]
    fn test_default_voice_and_prosody() {
        let config = EdgeTTSConfig::default();
        assert_eq!(config.voice, "en-US-AnaNeural");
        assert_eq!(config.rate, "+10%");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_voice_name_expansion() {
        let config = EdgeTTSConfig::default();
        assert_eq!(
            config.voice_name().as_deref(),
            Some("Microsoft Server Speech Text to Speech Voice (en-US, AnaNeural)")
        );

        let config = EdgeTTSConfig {
            voice: "AnaNeural".to_string(),
            ..Default::default()
        };
        assert!(config.voice_name().is_none());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_http_endpoint() {
        let config = EdgeTTSConfig {
            endpoint: "https://speech.platform.bing.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("ws://"));
    }

    #[test]
    fn test_connection_url_query() {
        let url = EdgeTTSConfig::default()
            .connection_url("ABC", "conn1")
            .unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("TrustedClientToken".to_string(), TRUSTED_CLIENT_TOKEN.to_string()),
                ("Sec-MS-GEC".to_string(), "ABC".to_string()),
                ("Sec-MS-GEC-Version".to_string(), "1-130.0.2849.68".to_string()),
                ("ConnectionId".to_string(), "conn1".to_string()),
            ]
        );
    }
}

mod message_tests {
    use super::*;

    #[test]
    fn test_sec_ms_gec_known_value() {
        assert_eq!(
            sec_ms_gec(1_700_000_000),
            "42301B335578FEFDAE2637DED1ABD614505D432559EC08032B82048483726AFF"
        );
    }

    #[test]
    fn test_sec_ms_gec_stable_within_window() {
        // 1_700_000_000 + epoch offset sits 200s into its five minute window
        assert_eq!(sec_ms_gec(1_700_000_000), sec_ms_gec(1_699_999_850));
        assert_ne!(sec_ms_gec(1_700_000_000), sec_ms_gec(1_700_000_100));
    }

    #[test]
    fn test_timestamp_format() {
        let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(
            timestamp(now),
            "Tue Nov 14 2023 22:13:20 GMT+0000 (Coordinated Universal Time)"
        );
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml("Tom & <Jerry> said \"hi\"\n"),
            "Tom &amp; &lt;Jerry&gt; said &quot;hi&quot; "
        );
        assert_eq!(escape_xml("Let's"), "Let&apos;s");
    }

    #[test]
    fn test_speech_config_frame_is_valid_json_body() {
        let frame = speech_config_frame("now");
        let (headers, body) = frame.split_once("\r\n\r\n").unwrap();
        assert!(headers.contains("Path:speech.config"));
        let json: serde_json::Value = serde_json::from_str(body.trim()).unwrap();
        assert_eq!(
            json["context"]["synthesis"]["audio"]["outputFormat"],
            OUTPUT_FORMAT
        );
    }

    #[test]
    fn test_ssml_frame() {
        let config = EdgeTTSConfig::default();
        let voice = config.voice_name().unwrap();
        let ssml = build_ssml(&config, &voice, "Splash & splash");
        let frame = ssml_frame("req1", "now", &ssml);

        assert!(frame.starts_with("X-RequestId:req1\r\n"));
        assert!(frame.contains("X-Timestamp:nowZ\r\nPath:ssml\r\n\r\n<speak"));
        assert!(frame.contains("<voice name='Microsoft Server Speech Text to Speech Voice (en-US, AnaNeural)'>"));
        assert!(frame.contains("<prosody pitch='+0Hz' rate='+10%' volume='+0%'>Splash &amp; splash</prosody>"));
    }

    #[test]
    fn test_parse_frames() {
        assert_eq!(
            ServerFrame::from_text("X-RequestId:a\r\nPath:turn.end\r\n\r\n{}"),
            ServerFrame::TurnEnd
        );
        assert_eq!(
            ServerFrame::from_text("Path:turn.start\r\n\r\n{}"),
            ServerFrame::Other("turn.start".to_string())
        );
        assert_eq!(
            ServerFrame::from_binary(binary_frame("audio", b"mp3")).unwrap(),
            ServerFrame::Audio(Bytes::from_static(b"mp3"))
        );
    }

    #[test]
    fn test_parse_bad_binary_frames() {
        assert!(ServerFrame::from_binary(Bytes::from_static(b"\x00")).is_err());
        assert!(ServerFrame::from_binary(Bytes::from_static(b"\x00\xffPath:audio")).is_err());
        assert!(ServerFrame::from_binary(Bytes::from_static(b"\x00\x04X:yzmp3")).is_err());
    }
}

mod provider_tests {
    use super::*;

    /// Serve one synthesis exchange on a local WebSocket listener.
    async fn spawn_service(frames: Vec<Message>) -> (String, tokio::task::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();

            let mut received = Vec::new();
            while received.len() < 2 {
                match ws.next().await {
                    Some(Ok(Message::Text(text))) => received.push(text.as_str().to_string()),
                    Some(Ok(_)) => {}
                    _ => break,
                }
            }
            for frame in frames {
                if ws.send(frame).await.is_err() {
                    break;
                }
            }
            received
        });

        (format!("ws://{addr}/edge/v1"), handle)
    }

    fn config_for(endpoint: String) -> EdgeTTSConfig {
        EdgeTTSConfig {
            endpoint,
            timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_synthesize_concatenates_audio_until_turn_end() {
        let (endpoint, server) = spawn_service(vec![
            Message::Text("Path:turn.start\r\n\r\n{}".into()),
            Message::Binary(binary_frame("audio", b"ID3-")),
            Message::Binary(binary_frame("audio", b"frames")),
            Message::Text("Path:turn.end\r\n\r\n{}".into()),
        ])
        .await;

        let tts = EdgeTTS::new(config_for(endpoint)).unwrap();
        let audio = tts.synthesize("Hello <Tim>").await.unwrap();
        assert_eq!(audio.as_ref(), b"ID3-frames");
        assert_eq!(tts.get_provider_info(), "edge");

        let received = server.await.unwrap();
        assert!(received[0].contains("Path:speech.config"));
        assert!(received[1].contains("Path:ssml"));
        assert!(received[1].contains("Hello &lt;Tim&gt;"));
    }

    #[tokio::test]
    async fn test_synthesize_without_audio_fails() {
        let (endpoint, _server) = spawn_service(vec![
            Message::Text("Path:turn.start\r\n\r\n{}".into()),
            Message::Text("Path:turn.end\r\n\r\n{}".into()),
        ])
        .await;

        let tts = EdgeTTS::new(config_for(endpoint)).unwrap();
        assert_eq!(tts.synthesize("hi").await.unwrap_err(), TTSError::EmptyAudio);
    }

    #[tokio::test]
    async fn test_synthesize_unreachable_fails_to_connect() {
        let tts = EdgeTTS::new(config_for("ws://127.0.0.1:9/edge/v1".to_string())).unwrap();
        assert!(matches!(
            tts.synthesize("hi").await.unwrap_err(),
            TTSError::ConnectionFailed(_)
        ));
    }
}
