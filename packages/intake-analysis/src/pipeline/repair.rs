//! Syntactic repair for truncated JSON.
//!
//! Model output that hits the token budget stops mid-structure: inside a
//! string, after a key, after a comma. This module closes such fragments so
//! a strict parse can succeed. The repair is purely syntactic and never
//! invents content: every step either truncates the tail back to the last
//! complete token or appends closing delimiters. Input that is already
//! balanced and terminated is returned byte-identical.
//!
//! Steps, in order:
//! 1. If the text ends inside a string, truncate at that string's opening
//!    quote.
//! 2. If the innermost open container has a member without a committed
//!    value (a bare `"key"`, a `"key":` with nothing after, or a partial
//!    scalar), truncate at the member start.
//! 3. Strip one trailing comma.
//! 4. Close every open `[` and `{` in reverse opening order.

/// Repair a possibly-truncated JSON fragment.
pub fn repair_json_fragment(text: &str) -> String {
    let mut work: &str = text;

    // Step 1: unterminated string
    let state = scan(work);
    if state.in_string {
        work = &work[..state.string_start];
    }

    // Step 2: dangling member
    let state = scan(work);
    if let Some(cut) = dangling_member_cut(&state, work) {
        work = &work[..cut];
    }

    // Step 3: trailing comma
    let trimmed = work.trim_end();
    if trimmed.ends_with(',') {
        work = &trimmed[..trimmed.len() - 1];
    }

    // Step 4: balance
    let state = scan(work);
    if state.stack.is_empty() {
        return work.to_string();
    }
    let mut out = String::with_capacity(work.len() + state.stack.len());
    out.push_str(work);
    for frame in state.stack.iter().rev() {
        out.push(if frame.delim == b'[' { ']' } else { '}' });
    }
    out
}

/// One open container on the scanner stack.
struct Frame {
    /// b'{' or b'['
    delim: u8,

    /// Byte offset where the in-flight member (or array element) started
    member_start: Option<usize>,

    /// An object member has passed its colon
    saw_colon: bool,

    /// The in-flight member or element has a complete value
    value_done: bool,
}

#[derive(Default)]
struct ScanState {
    stack: Vec<Frame>,
    in_string: bool,
    string_start: usize,
    scalar_start: Option<usize>,
}

/// Single left-to-right pass tracking open containers, string state, and
/// the in-flight member of each container.
///
/// Operates on bytes; every byte it inspects is ASCII, so offsets it
/// records always fall on character boundaries.
fn scan(text: &str) -> ScanState {
    let mut state = ScanState::default();
    let mut escape_next = false;

    for (i, &b) in text.as_bytes().iter().enumerate() {
        if state.in_string {
            if escape_next {
                escape_next = false;
            } else if b == b'\\' {
                escape_next = true;
            } else if b == b'"' {
                state.in_string = false;
                string_token_done(&mut state.stack);
            }
            continue;
        }

        if state.scalar_start.is_some() && is_structural(b) {
            state.scalar_start = None;
            token_done(&mut state.stack);
        }

        match b {
            b'"' => {
                state.in_string = true;
                state.string_start = i;
                note_member_start(&mut state.stack, i);
            }
            b'{' | b'[' => {
                note_member_start(&mut state.stack, i);
                state.stack.push(Frame {
                    delim: b,
                    member_start: None,
                    saw_colon: false,
                    value_done: false,
                });
            }
            b'}' | b']' => {
                let closes_top = state
                    .stack
                    .last()
                    .map(|frame| matches_close(frame.delim, b))
                    .unwrap_or(false);
                if closes_top {
                    state.stack.pop();
                    token_done(&mut state.stack);
                }
            }
            b':' => {
                if let Some(top) = state.stack.last_mut() {
                    if top.delim == b'{' {
                        top.saw_colon = true;
                        top.value_done = false;
                    }
                }
            }
            b',' => {
                if let Some(top) = state.stack.last_mut() {
                    top.member_start = None;
                    top.saw_colon = false;
                    top.value_done = false;
                }
            }
            b' ' | b'\t' | b'\n' | b'\r' => {}
            _ => {
                if state.scalar_start.is_none() {
                    state.scalar_start = Some(i);
                    note_member_start(&mut state.stack, i);
                }
            }
        }
    }
    state
}

fn is_structural(b: u8) -> bool {
    matches!(
        b,
        b'"' | b'{' | b'[' | b'}' | b']' | b':' | b',' | b' ' | b'\t' | b'\n' | b'\r'
    )
}

fn matches_close(open: u8, close: u8) -> bool {
    (open == b'{' && close == b'}') || (open == b'[' && close == b']')
}

fn note_member_start(stack: &mut [Frame], i: usize) {
    if let Some(top) = stack.last_mut() {
        if top.member_start.is_none() {
            top.member_start = Some(i);
        }
    }
}

/// A completed string counts as a value in arrays and after a colon in
/// objects; in object key position it leaves the member in flight.
fn string_token_done(stack: &mut [Frame]) {
    if let Some(top) = stack.last_mut() {
        if top.delim == b'[' || top.saw_colon {
            top.value_done = true;
        }
    }
}

/// A completed scalar or closed container commits the parent's in-flight
/// member the same way a completed string does.
fn token_done(stack: &mut [Frame]) {
    string_token_done(stack)
}

/// Where to cut when the innermost open container ends mid-member.
fn dangling_member_cut(state: &ScanState, text: &str) -> Option<usize> {
    let top = state.stack.last()?;
    let start = top.member_start?;
    if top.value_done {
        return None;
    }
    // Object member that never reached its colon cannot be completed.
    if top.delim == b'{' && !top.saw_colon {
        return Some(start);
    }
    match state.scalar_start {
        // Trailing scalar: keep it only if it already reads as a complete
        // JSON literal ("12" yes, "12." no, "tru" no).
        Some(scalar) => {
            if scalar_is_complete(&text[scalar..]) {
                None
            } else {
                Some(start)
            }
        }
        // Colon with no value started.
        None => Some(start),
    }
}

fn scalar_is_complete(slice: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(slice.trim_end()).is_ok()
}
