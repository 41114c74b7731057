//! Convert TextMesh rich text into BBCode.
//!
//! Reads the text to convert from the command line arguments, or stdin when
//! none are given. Set `TEXTMESH_LOG=path` to trace parser decisions.

use std::io::Read;

use textmesh_rs::{NodeRef, Tag, transform};

fn to_bbcode(node: NodeRef<'_, '_>, content: &str) -> String {
    let value = node.value().unwrap_or_default();
    match node.tag() {
        Tag::Bold => format!("[b]{content}[/b]"),
        Tag::Italic => format!("[i]{content}[/i]"),
        Tag::Underline => format!("[u]{content}[/u]"),
        Tag::Strikethrough => format!("[s]{content}[/s]"),
        Tag::Color => format!("[color={value}]{content}[/color]"),
        Tag::Size => format!("[size={value}]{content}[/size]"),
        Tag::Font => format!("[font={value}]{content}[/font]"),
        Tag::Link => format!("[url={value}]{content}[/url]"),
        Tag::Uppercase => content.to_uppercase(),
        Tag::Lowercase => content.to_lowercase(),
        Tag::Page => "\n\n".to_string(),
        // Raw text, and tags BBCode has no equivalent for.
        _ => content.to_string(),
    }
}

fn main() -> std::io::Result<()> {
    if let Ok(path) = std::env::var("TEXTMESH_LOG") {
        if let Err(err) = textmesh_rs::init_logger(&path, log::Level::Trace) {
            eprintln!("logger not installed: {err}");
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let input = if args.is_empty() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.join(" ")
    };

    print!("{}", transform(&input, to_bbcode));
    Ok(())
}
