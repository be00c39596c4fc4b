//! jotcat - print a file with syntax coloring
//! Demo consumer of the document core: loads through TextDocument and
//! renders the styled runs with terminal colors

use crossterm::style::{Color, Stylize};
use jotter::document::TextDocument;
use jotter::lexer::{Token, TokenCategory};

/// Category colors, after the shipped product's style table
fn category_color(category: TokenCategory) -> Option<Color> {
    match category {
        TokenCategory::Default => None,
        TokenCategory::Keyword => Some(Color::Magenta),
        TokenCategory::LineComment | TokenCategory::BlockComment => Some(Color::DarkGreen),
        TokenCategory::StringLiteral | TokenCategory::CharLiteral => Some(Color::Blue),
        TokenCategory::Number => Some(Color::Red),
    }
}

fn main() {
    let path = match std::env::args().nth(1) {
        Some(p) => p,
        None => {
            eprintln!("Usage: jotcat <file>");
            std::process::exit(2);
        }
    };

    let mut tokens: Vec<Token> = Vec::new();
    let document = match TextDocument::open(1, &path, &mut tokens) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    for token in &tokens {
        match category_color(token.category) {
            Some(color) => print!("{}", token.text.as_str().with(color)),
            None => print!("{}", token.text),
        }
    }

    let mapper = document.mapper();
    eprintln!(
        "{} | {} | {} lines{}",
        document.display_name(),
        document.encoding().name(),
        mapper.line_count(),
        if document.is_read_only() {
            " | read-only"
        } else {
            ""
        }
    );
}
