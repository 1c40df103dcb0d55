//! Splits ZPL text into commands.
//!
//! A command starts with `^` (format) or `~` (control) followed by a
//! two-letter code. `^A` is the exception: the letter after it is the font
//! designator and belongs to the arguments. Arguments run until the next
//! prefix character; field data (`^FD`, `^FV`) and comments (`^FX`) only
//! stop at the next `^` so that `~` can appear in printed text.

/// A single command with its raw argument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'a> {
    pub prefix: char,
    /// Upper-cased command code without the prefix.
    pub code: String,
    pub args: &'a str,
    /// Byte offset of the prefix character in the decoded markup.
    pub offset: usize,
}

impl Command<'_> {
    pub fn is(&self, code: &str) -> bool {
        self.prefix == '^' && self.code == code
    }
}

fn is_prefix(c: char) -> bool {
    c == '^' || c == '~'
}

fn takes_raw_data(code: &str) -> bool {
    matches!(code, "FD" | "FV" | "FX")
}

/// Tokenize markup text. Anything before the first prefix is discarded.
pub fn tokenize(input: &str) -> Vec<Command<'_>> {
    let mut commands = Vec::new();
    let mut pos = match input.find(is_prefix) {
        Some(p) => p,
        None => return commands,
    };

    while pos < input.len() {
        let prefix = input[pos..].chars().next().unwrap_or('^');
        let code_start = pos + prefix.len_utf8();
        let (code, args_start) = read_code(input, code_start);

        let rest = &input[args_start..];
        let args_len = if takes_raw_data(&code) {
            rest.find('^')
        } else {
            rest.find(is_prefix)
        }
        .unwrap_or(rest.len());

        commands.push(Command {
            prefix,
            code,
            args: &rest[..args_len],
            offset: pos,
        });

        pos = args_start + args_len;
    }

    commands
}

fn read_code(input: &str, start: usize) -> (String, usize) {
    let mut chars = input[start..].char_indices();
    let mut code = String::with_capacity(2);

    match chars.next() {
        Some((_, c)) if is_prefix(c) => return (code, start),
        Some((_, c)) => code.push(c.to_ascii_uppercase()),
        None => return (code, start),
    }

    // ^A<font> keeps the designator in the argument text, except ^A@.
    if code == "A" && !input[start + 1..].starts_with('@') {
        return (code, start + 1);
    }

    match chars.next() {
        Some((i, c)) if !is_prefix(c) => {
            code.push(c.to_ascii_uppercase());
            (code, start + i + c.len_utf8())
        }
        Some((i, _)) => (code, start + i),
        None => (code, input.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|c| c.code).collect()
    }

    #[test]
    fn test_tokenize_basic_label() {
        let commands = tokenize("^XA^FO10,20^FDHello^FS^XZ");
        let codes: Vec<_> = commands.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["XA", "FO", "FD", "FS", "XZ"]);
        assert_eq!(commands[1].args, "10,20");
        assert_eq!(commands[2].args, "Hello");
        assert_eq!(commands[1].offset, 3);
    }

    #[test]
    fn test_font_designator_stays_in_args() {
        let commands = tokenize("^A0N,30,20^FDx^FS");
        assert_eq!(commands[0].code, "A");
        assert_eq!(commands[0].args, "0N,30,20");
    }

    #[test]
    fn test_leading_text_is_ignored() {
        assert_eq!(codes("garbage before ^XA^XZ"), ["XA", "XZ"]);
        assert!(tokenize("no commands at all").is_empty());
    }

    #[test]
    fn test_field_data_keeps_tilde() {
        let commands = tokenize("^FDa~b^FS");
        assert_eq!(commands[0].args, "a~b");
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn test_control_commands_and_lowercase() {
        let commands = tokenize("~jr^xa^xz");
        assert_eq!(commands[0].prefix, '~');
        assert_eq!(commands[0].code, "JR");
        assert!(commands[1].is("XA"));
    }

    #[test]
    fn test_truncated_command_at_end() {
        let commands = tokenize("^XA^X");
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1].code, "X");
    }
}
