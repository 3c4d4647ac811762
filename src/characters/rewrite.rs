use crate::models::{CharacterEntry, Task};

const TAG_OPEN: &str = "(@";
const TAG_CLOSE: char = ')';

/// Counts of tasks touched by [`apply_character_id`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Tasks whose prompt text changed.
    pub prompts_rewritten: usize,
    /// Tasks whose character entries changed.
    pub assets_rewritten: usize,
}

impl RewriteOutcome {
    pub fn changed(&self) -> bool {
        self.prompts_rewritten > 0 || self.assets_rewritten > 0
    }
}

/// The inline tag stamped after a name in prompt text: `" (@{id} )"`.
pub fn prompt_tag(id: &str) -> String {
    format!(" (@{} )", id)
}

/// Stamp `new_id` onto every standalone occurrence of `name` in `text`.
///
/// An occurrence is the literal name, optionally followed by whitespace and an
/// existing `(@...)` tag; the whole match is replaced by the name plus
/// [`prompt_tag`]. Rewriting already-rewritten text yields the same text.
///
/// Matching rules:
/// - A name whose first (last) character is a letter, digit or `_` does not match
///   when the preceding (following) character is one too, so `Alice` never matches
///   inside `Alice2` or `MaryAlice`, and `Ana` never matches inside `Anaïs`.
///   Scripts written without spaces (Han, kana, Hangul) have no word boundary and
///   match anywhere.
/// - A tag identical to the one being stamped is consumed whole, even when the
///   identifier itself contains `)`.
/// - Text inside a `(@...)` tag that does not follow the name is left alone, so an
///   identifier that happens to contain the name is never rewritten.
pub fn rewrite_prompt(text: &str, name: &str, new_id: &str) -> String {
    if name.is_empty() {
        return text.to_string();
    }

    let tag = prompt_tag(new_id);
    let mut out = String::with_capacity(text.len() + tag.len());
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if rest.starts_with(name) && is_standalone(text, pos, pos + name.len()) {
            let after = pos + name.len();
            out.push_str(name);
            out.push_str(&tag);
            pos = after + existing_tag_len(&text[after..], &tag).unwrap_or(0);
            continue;
        }

        if let Some(len) = foreign_tag_len(rest) {
            out.push_str(&rest[..len]);
            pos += len;
            continue;
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        out.push(ch);
        pos += ch.len_utf8();
    }

    out
}

/// Apply `new_id` to `name` across every task in the batch.
///
/// Prompts are rewritten with [`rewrite_prompt`]; character entries whose
/// decoded name equals `name` become the canonical `"{name}@{new_id} "` form,
/// other entries keep their text and position. No task is filtered out up front,
/// and absent matches are a no-op.
pub fn apply_character_id(tasks: &mut [Task], name: &str, new_id: &str) -> RewriteOutcome {
    let mut outcome = RewriteOutcome::default();

    for task in tasks.iter_mut() {
        let segment = &mut task.segment;

        let rewritten = rewrite_prompt(&segment.prompt_text, name, new_id);
        if rewritten != segment.prompt_text {
            segment.prompt_text = rewritten;
            outcome.prompts_rewritten += 1;
        }

        let mut asset_changed = false;
        for entry in segment.asset.characters.iter_mut() {
            if entry.name() != name {
                continue;
            }
            let canonical = CharacterEntry::with_id(name, new_id);
            if *entry != canonical {
                *entry = canonical;
                asset_changed = true;
            }
        }
        if asset_changed {
            outcome.assets_rewritten += 1;
        }
    }

    tracing::debug!(
        name,
        id = new_id,
        prompts = outcome.prompts_rewritten,
        assets = outcome.assets_rewritten,
        "Applied character id"
    );
    outcome
}

/// Han, Hiragana, Katakana and Hangul.
fn is_unspaced_script(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x11FF
            | 0x3040..=0x30FF
            | 0x3130..=0x318F
            | 0x31F0..=0x31FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xA960..=0xA97F
            | 0xAC00..=0xD7FF
            | 0xF900..=0xFAFF
            | 0xFF66..=0xFF9F
            | 0x20000..=0x3134F
    )
}

fn is_word_char(c: char) -> bool {
    (c.is_alphanumeric() || c == '_') && !is_unspaced_script(c)
}

fn is_standalone(text: &str, start: usize, end: usize) -> bool {
    let name = &text[start..end];
    let glued_before = name.chars().next().is_some_and(is_word_char)
        && text[..start].chars().next_back().is_some_and(is_word_char);
    let glued_after = name.chars().next_back().is_some_and(is_word_char)
        && text[end..].chars().next().is_some_and(is_word_char);
    !glued_before && !glued_after
}

/// Length of the tag following a name match: `\s*` then either `tag` verbatim
/// or `\(@[^)]*\)`.
fn existing_tag_len(s: &str, tag: &str) -> Option<usize> {
    let trimmed = s.trim_start();
    let ws = s.len() - trimmed.len();
    let canonical = tag.trim_start();
    if trimmed.starts_with(canonical) {
        return Some(ws + canonical.len());
    }
    foreign_tag_len(trimmed).map(|len| ws + len)
}

/// Length of `\(@[^)]*\)` at the start of `s`.
fn foreign_tag_len(s: &str) -> Option<usize> {
    let body = s.strip_prefix(TAG_OPEN)?;
    let close = body.find(TAG_CLOSE)?;
    Some(TAG_OPEN.len() + close + TAG_CLOSE.len_utf8())
}
