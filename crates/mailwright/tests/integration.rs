//! Integration tests for message construction and header building.
//!
//! Every test dates headers with a fixed clock so output is reproducible.

use chrono::{FixedOffset, TimeZone};

use mailwright::{
    Attachment, Config, ContentType, Error, FixedClock, HeaderBuilder, Message, Participant,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn clock() -> FixedClock {
    FixedClock(
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2003, 7, 1, 10, 52, 37)
            .unwrap(),
    )
}

fn file(name: &str, alternative: bool) -> Attachment {
    Attachment::data(name.as_bytes().to_vec(), name, ContentType::application_octet_stream())
        .with_alternative(alternative)
}

#[test]
fn test_html_overrides_flagged_attachments() {
    init_tracing();
    let message = Message::builder("sender@example.com")
        .to("a@example.com")
        .html("<h1>Hi</h1>")
        .attach_all([file("a", true), file("b", false), file("c", true), file("d", true)])
        .build();

    let alternative = message.alternative().unwrap();
    assert_eq!(alternative, &Attachment::html("<h1>Hi</h1>", true));
    assert_eq!(message.attachments(), &[file("b", false)]);
    assert!(message.attachments().iter().all(|a| !a.is_alternative()));
}

#[test]
fn test_last_flagged_attachment_becomes_alternative() {
    init_tracing();
    let message = Message::builder("sender@example.com")
        .attach_all([file("A", true), file("B", false), file("C", true)])
        .build();

    assert_eq!(message.alternative(), Some(&file("C", true)));
    assert_eq!(message.attachments(), &[file("A", true), file("B", false)]);
    assert!(message.has_attachment());
}

#[test]
fn test_no_alternative_passthrough() {
    let input = [file("x", false), file("y", false)];
    let message = Message::builder("sender@example.com")
        .attach_all(input.clone())
        .build();

    assert!(message.alternative().is_none());
    assert_eq!(message.attachments(), &input);
}

#[test]
fn test_reserved_header_exclusion() {
    let message = Message::builder("sender@example.com")
        .to("a@example.com")
        .headers([("Content-Type", "x"), ("X-Custom", "y")])
        .build();

    let headers = message.headers_with(clock()).unwrap();
    assert_eq!(headers.get("X-CUSTOM"), Some("y"));
    assert!(headers.get("CONTENT-TYPE").is_none());
    assert!(headers.to_string().contains("\r\nX-CUSTOM: y"));
}

#[test]
fn test_cc_header_presence() {
    let without = Message::builder("sender@example.com")
        .to("a@example.com")
        .build();
    let rendered = without.headers_with(clock()).unwrap().to_string();
    assert!(!rendered.lines().any(|line| line.starts_with("CC:")));

    let with = Message::builder("sender@example.com")
        .to("a@example.com")
        .cc(Participant::with_name("Carol", "carol@example.com"))
        .build();
    let rendered = with.headers_with(clock()).unwrap().to_string();
    let cc_lines: Vec<&str> = rendered.split("\r\n").filter(|l| l.starts_with("CC:")).collect();
    assert_eq!(cc_lines, ["CC: Carol <carol@example.com>"]);
}

#[test]
fn test_identifier_stability() {
    let message = Message::builder("sender@example.com").build();
    let first = message.message_id().unwrap();
    let second = message.message_id().unwrap();
    assert_eq!(first, second);

    let headers_a = message.headers_with(clock()).unwrap();
    let headers_b = message.headers_with(clock()).unwrap();
    assert_eq!(headers_a.get("MESSAGE-ID"), headers_b.get("MESSAGE-ID"));

    let ids: std::collections::HashSet<String> = (0..100)
        .map(|_| Message::builder("sender@example.com").build().id().to_string())
        .collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_hostname_extraction() {
    let message = Message::builder("user@example.com").build();
    assert_eq!(message.hostname().unwrap(), "example.com");
    assert!(message.message_id().unwrap().ends_with("@example.com>"));

    let broken = Message::builder("user").to("a@example.com").build();
    match broken.hostname() {
        Err(Error::MissingDomain(email)) => assert_eq!(email, "user"),
        other => panic!("expected MissingDomain, got {other:?}"),
    }
    assert!(matches!(
        broken.headers_with(clock()),
        Err(Error::MissingDomain(_))
    ));
}

#[test]
fn test_bcc_invisible_in_headers_but_in_envelope() {
    let message = Message::builder("sender@example.com")
        .to("a@example.com")
        .bcc_all(["secret1@example.com", "secret2@example.com"])
        .build();

    let headers = message.headers_with(clock()).unwrap();
    assert!(headers.get("BCC").is_none());
    assert!(!headers.to_string().contains("secret"));

    let envelope = message.envelope();
    assert_eq!(
        envelope.recipients,
        ["a@example.com", "secret1@example.com", "secret2@example.com"]
    );
}

#[test]
fn test_full_header_block() {
    let message = Message::builder(("Sender Name", "sender@example.com"))
        .to_all(["a@example.com", "b@example.com"])
        .subject("Status")
        .header("X-Priority", "1")
        .config(Config::new().with_product("Swift-SMTP"))
        .build();

    let expected = format!(
        "MESSAGE-ID: <{}.Swift-SMTP@example.com>\r\n\
         DATE: Tue, 1 Jul 2003 10:52:37 +0200\r\n\
         FROM: Sender Name <sender@example.com>\r\n\
         TO: a@example.com, b@example.com\r\n\
         SUBJECT: Status\r\n\
         MIME-VERSION: 1.0 (Swift-SMTP)\r\n\
         X-PRIORITY: 1",
        message.id()
    );
    let rendered = HeaderBuilder::new(&message)
        .with_clock(clock())
        .build_string()
        .unwrap();
    assert_eq!(rendered, expected);
}

#[test]
fn test_caller_overrides_generated_header() {
    let message = Message::builder("sender@example.com")
        .to("a@example.com")
        .header("Message-ID", "<custom@example.com>")
        .header("mime-version", "1.0")
        .build();

    let headers = message.headers_with(clock()).unwrap();
    assert_eq!(headers.get("MESSAGE-ID"), Some("<custom@example.com>"));
    assert_eq!(headers.get("MIME-VERSION"), Some("1.0"));
    assert_eq!(headers.iter().next().map(|(n, _)| n), Some("MESSAGE-ID"));
}

#[test]
fn test_rendered_message_with_attachment() {
    init_tracing();
    let message = Message::builder(("Zoë", "zoe@example.com"))
        .to("a@example.com")
        .subject("Résumé")
        .text("Attached.")
        .attach(Attachment::data(
            b"%PDF-1.4".to_vec(),
            "cv.pdf",
            ContentType::from_path("cv.pdf"),
        ))
        .build();

    let rendered = message.to_rfc5322_with(clock()).unwrap();
    let (headers, body) = rendered.split_once("\r\n\r\n").unwrap();

    assert!(headers.contains("FROM: =?utf-8?B?Wm/Dqw==?= <zoe@example.com>"));
    assert!(headers.contains("SUBJECT: =?utf-8?B?"));
    assert!(headers.contains("CONTENT-TYPE: multipart/mixed; boundary=\""));
    assert!(body.contains("CONTENT-TYPE: application/pdf; name=cv.pdf"));
    assert!(body.contains("CONTENT-DISPOSITION: attachment; filename=\"cv.pdf\""));
    assert!(body.contains("JVBERi0xLjQ="));
    assert!(rendered.ends_with("--\r\n"));
}
