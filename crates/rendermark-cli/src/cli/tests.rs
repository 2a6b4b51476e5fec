use super::*;
use clap::Parser;

#[test]
fn classify_accepts_many_names_and_declared_type() {
    let cli = Cli::try_parse_from([
        "rendermark",
        "classify",
        "a.png",
        "b.tar.gz",
        "--content-type",
        "image/*",
    ])
    .expect("parse");
    match cli.command {
        Commands::Classify(ClassifyArgs {
            names,
            content_type,
        }) => {
            assert_eq!(names, vec!["a.png".to_string(), "b.tar.gz".to_string()]);
            assert_eq!(content_type.as_deref(), Some("image/*"));
        }
        _ => panic!("expected classify command"),
    }
}

#[test]
fn classify_requires_a_name() {
    assert!(Cli::try_parse_from(["rendermark", "classify"]).is_err());
}

#[test]
fn render_parses_origin_overrides() {
    let cli = Cli::try_parse_from([
        "rendermark",
        "render",
        "notes.md",
        "--absolute",
        "--protocol",
        "HTTPS://",
        "--host",
        "docs.example.org",
    ])
    .expect("parse");
    match cli.command {
        Commands::Render(args) => {
            assert!(args.absolute);
            assert_eq!(args.file.to_str(), Some("notes.md"));
            assert_eq!(args.protocol.as_deref(), Some("https"));
            assert_eq!(args.host.as_deref(), Some("docs.example.org"));
        }
        _ => panic!("expected render command"),
    }
}

#[test]
fn render_rejects_unknown_protocol() {
    let parsed = Cli::try_parse_from(["rendermark", "render", "a.md", "--protocol", "ftp"]);
    assert!(parsed.is_err(), "ftp must be rejected");
}

#[test]
fn web_defaults_to_loopback() {
    let cli = Cli::try_parse_from(["rendermark", "web"]).expect("parse");
    match cli.command {
        Commands::Web(WebArgs { host, port }) => {
            assert_eq!(host, "127.0.0.1");
            assert_eq!(port, 8787);
        }
        _ => panic!("expected web command"),
    }
}
