//! Extracting the solution code from a problem note

use pulldown_cmark::{CodeBlockKind, Event, Parser as MdParser, Tag, TagEnd};

fn matches_language(info: &str, language: Option<&str>) -> bool {
    match language {
        None => true,
        Some(language) => info
            .split_whitespace()
            .next()
            .is_some_and(|lang| lang.eq_ignore_ascii_case(language)),
    }
}

/// Content of the first non-blank fenced code block.
///
/// With `language` set, only blocks whose info string starts with that
/// language (case-insensitive) are considered. Indented code blocks never
/// count.
pub fn extract_solution(markdown: &str, language: Option<&str>) -> Option<String> {
    let mut capturing = false;
    let mut code = String::new();

    for event in MdParser::new(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                capturing = matches_language(&info, language);
                code.clear();
            }
            Event::Text(text) if capturing => code.push_str(&text),
            Event::End(TagEnd::CodeBlock) if capturing => {
                if !code.trim().is_empty() {
                    return Some(code);
                }
                capturing = false;
            }
            _ => {}
        }
    }

    None
}
