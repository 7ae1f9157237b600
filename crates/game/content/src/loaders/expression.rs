//! Text form of behavior expressions.
//!
//! Expressions are written as whitespace-separated keyword names in postfix
//! order, e.g. `SnakeDirection ParamDirection Equal`. A bare decimal number
//! is shorthand for `Int <number>`.

use snake_core::Keyword;

use crate::loaders::LoadResult;

/// Encodes a textual expression into words.
///
/// An empty string yields an empty expression.
pub fn parse_expression(text: &str) -> LoadResult<Vec<u32>> {
    let mut words = Vec::new();
    let mut tokens = text.split_whitespace();

    while let Some(token) = tokens.next() {
        if let Ok(literal) = token.parse::<u32>() {
            words.extend([Keyword::Int.word(), literal]);
            continue;
        }

        let keyword: Keyword = token
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown keyword '{}' in expression '{}'", token, text))?;

        if keyword == Keyword::Int {
            let literal = tokens
                .next()
                .and_then(|next| next.parse::<u32>().ok())
                .ok_or_else(|| anyhow::anyhow!("Int must be followed by a number in '{}'", text))?;
            words.extend([keyword.word(), literal]);
        } else {
            words.push(keyword.word());
        }
    }

    Ok(words)
}
