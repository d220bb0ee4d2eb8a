//! LaTeX math parser.
//!
//! A recursive-descent builder reading one character at a time,
//! with a single character of push back.
//! The first error aborts the whole parse.

use std::fmt;
use std::str::Chars;

use crate::Span;
use crate::atom::{
    AtomKind, AtomType, ColumnAlignment, FontStyle, Fraction, Inner, LineStyle, MathAtom,
    MathList, Radical, Table,
};
use crate::input::Cursor;
use crate::symbols;

/// Kind of parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The braces `{` `}` do not match
    MismatchBraces,
    /// A command is not recognized
    InvalidCommand,
    /// An expected character such as `]` was not found
    CharacterNotFound,
    /// `\left` or `\right` is not followed by a delimiter
    MissingDelimiter,
    /// The delimiter following `\left` or `\right` is not valid
    InvalidDelimiter,
    /// No `\right` for a `\left`
    MissingRight,
    /// No `\left` for a `\right`
    MissingLeft,
    /// Unknown environment, or `\end` does not match `\begin`
    InvalidEnv,
    /// A command only valid inside an environment is used outside of one
    MissingEnv,
    /// No `\begin` for an `\end`
    MissingBegin,
    /// No `\end` for a `\begin`
    MissingEnd,
    /// The number of columns does not match the environment
    InvalidNumColumns,
    /// Programming error
    InternalError,
    /// `\limits` or `\nolimits` not following a large operator
    InvalidLimits,
}

/// A parse error, with a message and the span of input where it occured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error
    pub kind: ParseErrorKind,
    /// Human readable message
    pub message: String,
    /// Byte range of the input being read when the error was raised
    pub span: Span,
}

impl ParseError {
    fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        ParseError {
            kind,
            message: message.into(),
            span: (0, 0),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}

/// Result of parsing
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Parse a LaTeX math string into a math list
pub fn parse(input: &str) -> ParseResult<MathList> {
    let mut builder = Builder::new(input);
    builder.build()
}

const SINGLE_CHAR_COMMANDS: &[char] = &[
    '{', '}', '$', '#', '%', '_', '|', ' ', ',', '>', ';', '!', '\\',
];

#[derive(Debug)]
struct EnvProperties {
    name: Option<String>,
    ended: bool,
    num_rows: usize,
}

impl EnvProperties {
    fn new(name: Option<String>) -> Self {
        EnvProperties {
            name,
            ended: false,
            num_rows: 0,
        }
    }
}

/// The `\left` being built, waiting for its `\right`
#[derive(Debug, Default)]
struct InnerFrame {
    right: Option<MathAtom>,
}

struct Builder<'a> {
    input: &'a str,
    cursor: Cursor<Chars<'a>>,
    token_start: usize,
    current_inner: Option<InnerFrame>,
    current_env: Option<EnvProperties>,
    font_style: FontStyle,
    spaces_allowed: bool,
}

/// Append `sublist` and return the index of its last atom
fn append_sublist(list: &mut MathList, sublist: MathList) -> Option<usize> {
    let empty = sublist.is_empty();
    list.append(sublist);
    if empty { None } else { Some(list.len() - 1) }
}

fn is_non_space(c: char) -> bool {
    !('\u{21}'..='\u{7E}').contains(&c)
}

impl<'a> Builder<'a> {
    fn new(input: &'a str) -> Self {
        Builder {
            input,
            cursor: Cursor::new(input.chars()),
            token_start: 0,
            current_inner: None,
            current_env: None,
            font_style: FontStyle::Default,
            spaces_allowed: false,
        }
    }

    fn error(&self, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        ParseError {
            kind,
            message: message.into(),
            span: (self.token_start, self.cursor.pos()),
        }
    }

    fn build(&mut self) -> ParseResult<MathList> {
        let list = self.build_internal(false, None)?;
        if self.cursor.has_chars() {
            return Err(self.error(
                ParseErrorKind::MismatchBraces,
                format!("Mismatched braces: {}", self.input),
            ));
        }
        Ok(list)
    }

    fn build_internal(&mut self, one_char_only: bool, stop: Option<char>) -> ParseResult<MathList> {
        assert!(
            !(one_char_only && stop.is_some()),
            "Cannot set both one_char_only and stop"
        );
        let mut list = MathList::new();
        // index in list of the atom receiving scripts and modifiers
        let mut prev: Option<usize> = None;

        while self.cursor.has_chars() {
            self.token_start = self.cursor.pos();
            let Some(ch) = self.cursor.next() else {
                break;
            };
            if one_char_only && matches!(ch, '^' | '}' | '_' | '&') {
                // left for the caller
                self.cursor.unadvance();
                return Ok(list);
            }
            if stop == Some(ch) {
                return Ok(list);
            }

            let mut atom = match ch {
                '^' | '_' => {
                    let sup = ch == '^';
                    let target = prev.filter(|&i| {
                        let atom = &list.atoms[i];
                        let taken = if sup {
                            atom.superscript().is_some()
                        } else {
                            atom.subscript().is_some()
                        };
                        !taken && atom.atom_type().supports_scripts()
                    });
                    let index = match target {
                        Some(i) => i,
                        None => {
                            list.push(MathAtom::with_type(AtomType::Ordinary, ""));
                            list.len() - 1
                        }
                    };
                    prev = Some(index);
                    // a stop character right after ^ or _ belongs to the script
                    let script = self.build_internal(true, None)?;
                    let target = &mut list.atoms[index];
                    if sup {
                        target.set_superscript(Some(script));
                    } else {
                        target.set_subscript(Some(script));
                    }
                    continue;
                }
                '{' => {
                    let sublist = self.build_internal(false, Some('}'))?;
                    prev = append_sublist(&mut list, sublist);
                    if one_char_only {
                        return Ok(list);
                    }
                    continue;
                }
                '}' => {
                    return Err(self.error(ParseErrorKind::MismatchBraces, "Mismatched braces."));
                }
                '\\' => {
                    let command = self.read_command();
                    if let Some(done) = self.stop_command(&command, &mut list, stop)? {
                        return Ok(done);
                    }
                    if self.apply_modifier(&command, prev.map(|i| &mut list.atoms[i]))? {
                        continue;
                    }
                    if let Some(style) = symbols::font_style_named(&command) {
                        let old_spaces_allowed = self.spaces_allowed;
                        let old_font_style = self.font_style;
                        self.spaces_allowed = command == "text";
                        self.font_style = style;
                        let sublist = self.build_internal(true, None);
                        self.font_style = old_font_style;
                        self.spaces_allowed = old_spaces_allowed;
                        prev = append_sublist(&mut list, sublist?);
                        if one_char_only {
                            return Ok(list);
                        }
                        continue;
                    }
                    self.atom_for_command(&command)?
                }
                '&' => {
                    if self.current_env.is_some() {
                        return Ok(list);
                    }
                    let table = self.build_table(None, Some(list), false)?;
                    return Ok(MathList::from_atoms(vec![table]));
                }
                ' ' if self.spaces_allowed => MathAtom::with_type(AtomType::Ordinary, " "),
                _ => match MathAtom::for_character(ch) {
                    Some(atom) => atom,
                    None => continue,
                },
            };

            atom.font_style = self.font_style;
            list.push(atom);
            prev = Some(list.len() - 1);

            if one_char_only {
                return Ok(list);
            }
        }

        match stop {
            Some('}') => Err(self.error(ParseErrorKind::MismatchBraces, "Missing closing brace")),
            Some(c) => Err(self.error(
                ParseErrorKind::CharacterNotFound,
                format!("Expected character not found: {}", c),
            )),
            None => Ok(list),
        }
    }

    fn read_string(&mut self) -> String {
        let mut s = String::new();
        while let Some(c) = self.cursor.next() {
            if c.is_ascii_alphabetic() {
                s.push(c);
            } else {
                self.cursor.unadvance();
                break;
            }
        }
        s
    }

    fn skip_spaces(&mut self) {
        while let Some(c) = self.cursor.next() {
            if !is_non_space(c) {
                self.cursor.unadvance();
                return;
            }
        }
    }

    fn expect_char(&mut self, expected: char) -> bool {
        self.skip_spaces();
        match self.cursor.next() {
            Some(c) if c == expected => true,
            Some(_) => {
                self.cursor.unadvance();
                false
            }
            None => false,
        }
    }

    fn read_command(&mut self) -> String {
        if let Some(c) = self.cursor.next() {
            if SINGLE_CHAR_COMMANDS.contains(&c) {
                return c.to_string();
            }
            self.cursor.unadvance();
        }
        self.read_string()
    }

    fn read_delimiter(&mut self) -> Option<String> {
        self.skip_spaces();
        match self.cursor.next()? {
            '\\' => {
                let command = self.read_command();
                if command == "|" {
                    // distinguishes \| from |
                    Some("||".to_string())
                } else {
                    Some(command)
                }
            }
            c => Some(c.to_string()),
        }
    }

    fn read_braced(&mut self, accept: impl Fn(char) -> bool) -> ParseResult<String> {
        if !self.expect_char('{') {
            return Err(self.error(ParseErrorKind::CharacterNotFound, "Missing {"));
        }
        self.skip_spaces();
        let mut s = String::new();
        while let Some(c) = self.cursor.next() {
            if accept(c) {
                s.push(c);
            } else {
                self.cursor.unadvance();
                break;
            }
        }
        if !self.expect_char('}') {
            return Err(self.error(ParseErrorKind::CharacterNotFound, "Missing }"));
        }
        Ok(s)
    }

    fn read_environment(&mut self) -> ParseResult<String> {
        self.read_braced(|c| c.is_ascii_alphabetic())
    }

    fn read_color(&mut self) -> ParseResult<String> {
        self.read_braced(|c| c == '#' || c.is_ascii_hexdigit())
    }

    /// Read an amount such as `7.5mu`.
    fn read_mu(&mut self) -> ParseResult<f32> {
        self.skip_spaces();
        let mut amount = String::new();
        while let Some(c) = self.cursor.next() {
            if c.is_ascii_digit() || c == '.' || (c == '-' && amount.is_empty()) {
                amount.push(c);
            } else {
                self.cursor.unadvance();
                break;
            }
        }
        let Ok(mu) = amount.parse::<f32>() else {
            return Err(self.error(
                ParseErrorKind::InvalidCommand,
                format!("Invalid amount for mkern: {}", amount),
            ));
        };
        self.skip_spaces();
        if self.cursor.next() != Some('m') || self.cursor.next() != Some('u') {
            return Err(self.error(ParseErrorKind::CharacterNotFound, "Missing mu unit"));
        }
        Ok(mu)
    }

    fn boundary_atom(&mut self, delimiter_type: &str) -> ParseResult<MathAtom> {
        let Some(delim) = self.read_delimiter() else {
            return Err(self.error(
                ParseErrorKind::MissingDelimiter,
                format!("Missing delimiter for {}", delimiter_type),
            ));
        };
        symbols::boundary_atom(&delim).ok_or_else(|| {
            self.error(
                ParseErrorKind::InvalidDelimiter,
                format!("Invalid delimiter for {}: {}", delimiter_type, delim),
            )
        })
    }

    fn atom_for_command(&mut self, command: &str) -> ParseResult<MathAtom> {
        if let Some(atom) = symbols::atom_for_command(command) {
            return Ok(atom);
        }
        if let Some(mut accent) = symbols::accent_named(command) {
            let accentee = self.build_internal(true, None)?;
            if let AtomKind::Accent(inner, _) = &mut accent.kind {
                *inner = accentee;
            }
            return Ok(accent);
        }

        match command {
            "frac" | "binom" => {
                let numerator = self.build_internal(true, None)?;
                let denominator = self.build_internal(true, None)?;
                let binom = command == "binom";
                Ok(MathAtom::fraction(Fraction {
                    numerator,
                    denominator,
                    has_rule: !binom,
                    left_delim: binom.then(|| "(".to_string()),
                    right_delim: binom.then(|| ")".to_string()),
                }))
            }
            "sqrt" => {
                let mut radical = Radical::default();
                match self.cursor.next() {
                    Some('[') => {
                        radical.degree = Some(self.build_internal(false, Some(']'))?);
                        radical.radicand = self.build_internal(true, None)?;
                    }
                    Some(_) => {
                        self.cursor.unadvance();
                        radical.radicand = self.build_internal(true, None)?;
                    }
                    None => {}
                }
                Ok(MathAtom::radical(radical))
            }
            "left" => {
                let outer = self.current_inner.replace(InnerFrame::default());
                let left = self.boundary_atom("left")?;
                let list = self.build_internal(false, None)?;
                let frame = std::mem::replace(&mut self.current_inner, outer);
                let Some(right) = frame.and_then(|f| f.right) else {
                    return Err(self.error(ParseErrorKind::MissingRight, "Missing \\right"));
                };
                let mut inner = Inner::new(list);
                inner.set_left_boundary(Some(left));
                inner.set_right_boundary(Some(right));
                Ok(MathAtom::inner(inner))
            }
            "overline" => Ok(MathAtom::overline(self.build_internal(true, None)?)),
            "underline" => Ok(MathAtom::underline(self.build_internal(true, None)?)),
            "begin" => {
                let env = self.read_environment()?;
                self.build_table(Some(env), None, false)
            }
            "color" => {
                let color = self.read_color()?;
                let inner = self.build_internal(true, None)?;
                Ok(MathAtom::color(color, inner))
            }
            "textcolor" => {
                let color = self.read_color()?;
                let inner = self.build_internal(true, None)?;
                Ok(MathAtom::text_color(color, inner))
            }
            "mkern" => Ok(MathAtom::space(self.read_mu()?)),
            _ => Err(self.error(
                ParseErrorKind::InvalidCommand,
                format!("Invalid command {}", command),
            )),
        }
    }

    /// Handle commands ending the list being built.
    /// Returns the list to hand over to the caller, or `None` if `command`
    /// does not end a list.
    fn stop_command(
        &mut self,
        command: &str,
        list: &mut MathList,
        stop: Option<char>,
    ) -> ParseResult<Option<MathList>> {
        match command {
            "right" => {
                if self.current_inner.is_none() {
                    return Err(self.error(ParseErrorKind::MissingLeft, "Missing \\left"));
                }
                let right = self.boundary_atom("right")?;
                if let Some(frame) = self.current_inner.as_mut() {
                    frame.right = Some(right);
                }
                Ok(Some(std::mem::take(list)))
            }
            "over" | "atop" | "choose" | "brack" | "brace" => {
                let delims = match command {
                    "choose" => Some(("(", ")")),
                    "brack" => Some(("[", "]")),
                    "brace" => Some(("{", "}")),
                    _ => None,
                };
                let numerator = std::mem::take(list);
                let denominator = self.build_internal(false, stop)?;
                let frac = MathAtom::fraction(Fraction {
                    numerator,
                    denominator,
                    has_rule: command == "over",
                    left_delim: delims.map(|d| d.0.to_string()),
                    right_delim: delims.map(|d| d.1.to_string()),
                });
                Ok(Some(MathList::from_atoms(vec![frac])))
            }
            "\\" | "cr" => {
                if let Some(env) = self.current_env.as_mut() {
                    env.num_rows += 1;
                    Ok(Some(std::mem::take(list)))
                } else {
                    let table = self.build_table(None, Some(std::mem::take(list)), true)?;
                    Ok(Some(MathList::from_atoms(vec![table])))
                }
            }
            "end" => {
                let Some(begin) = self.current_env.as_ref().map(|e| e.name.clone()) else {
                    return Err(self.error(ParseErrorKind::MissingBegin, "Missing \\begin"));
                };
                let end = self.read_environment()?;
                if begin.as_deref() != Some(end.as_str()) {
                    return Err(self.error(
                        ParseErrorKind::InvalidEnv,
                        format!(
                            "Begin environment name {} does not match end name: {}",
                            begin.unwrap_or_default(),
                            end
                        ),
                    ));
                }
                if let Some(env) = self.current_env.as_mut() {
                    env.ended = true;
                }
                Ok(Some(std::mem::take(list)))
            }
            _ => Ok(None),
        }
    }

    /// Apply `\limits` or `\nolimits` to the previous atom.
    /// Returns whether `modifier` is one of them.
    fn apply_modifier(&self, modifier: &str, atom: Option<&mut MathAtom>) -> ParseResult<bool> {
        let value = match modifier {
            "limits" => true,
            "nolimits" => false,
            _ => return Ok(false),
        };
        match atom.map(|a| &mut a.kind) {
            Some(AtomKind::LargeOperator { limits, .. }) => {
                *limits = value;
                Ok(true)
            }
            _ => Err(self.error(
                ParseErrorKind::InvalidLimits,
                format!("{} can only be applied to an operator.", modifier),
            )),
        }
    }

    fn build_table(
        &mut self,
        env: Option<String>,
        first: Option<MathList>,
        is_row: bool,
    ) -> ParseResult<MathAtom> {
        let outer_env = self.current_env.replace(EnvProperties::new(env));
        let mut row = 0;
        let mut rows: Vec<Vec<MathList>> = vec![Vec::new()];
        if let Some(first) = first {
            rows[row].push(first);
            if is_row {
                if let Some(env) = self.current_env.as_mut() {
                    env.num_rows += 1;
                }
                row += 1;
                rows.push(Vec::new());
            }
        }

        loop {
            let Some(env) = self.current_env.as_ref() else {
                break;
            };
            if env.ended || !self.cursor.has_chars() {
                break;
            }
            let list = self.build_internal(false, None)?;
            rows[row].push(list);
            let num_rows = self.current_env.as_ref().map_or(0, |e| e.num_rows);
            if num_rows > row {
                row = num_rows;
                rows.push(Vec::new());
            }
        }

        let env = std::mem::replace(&mut self.current_env, outer_env)
            .unwrap_or_else(|| EnvProperties::new(None));
        if !env.ended && env.name.is_some() {
            return Err(self.error(ParseErrorKind::MissingEnd, "Missing \\end"));
        }
        table_with_environment(env.name.as_deref(), rows).map_err(|mut err| {
            err.span = (self.token_start, self.cursor.pos());
            err
        })
    }
}

/// Build the atom of a table environment from its cells.
///
/// Matrices get text style cells and are wrapped in an inner list
/// with their delimiters, `cases` likewise with a left brace.
/// Environments with a fixed number of columns fail with
/// [`ParseErrorKind::InvalidNumColumns`], unknown ones with
/// [`ParseErrorKind::InvalidEnv`].
pub fn table_with_environment(
    env: Option<&str>,
    cells: Vec<Vec<MathList>>,
) -> ParseResult<MathAtom> {
    let mut table = Table::new(env);
    table.cells = cells;

    let matrix_delims = match env {
        Some("matrix") => Some(None),
        Some("pmatrix") => Some(Some(("(", ")"))),
        Some("bmatrix") => Some(Some(("[", "]"))),
        Some("Bmatrix") => Some(Some(("{", "}"))),
        Some("vmatrix") => Some(Some(("vert", "vert"))),
        Some("Vmatrix") => Some(Some(("Vert", "Vert"))),
        _ => None,
    };

    if let Some(delims) = matrix_delims {
        // delimiters are carried by the wrapping inner
        table.environment = Some("matrix".to_string());
        table.inter_row_spacing = 0.0;
        table.inter_column_spacing = 18.0;
        prefix_cells(&mut table, || MathAtom::style(LineStyle::Text));
        let table = MathAtom::table(table);
        return Ok(match delims {
            Some((left, right)) => delimited(left, right, MathList::from_atoms(vec![table])),
            None => table,
        });
    }

    let check_columns = |table: &Table, n: usize, message: String| {
        if table.num_columns() != n {
            Err(ParseError::new(ParseErrorKind::InvalidNumColumns, message))
        } else {
            Ok(())
        }
    };

    match env {
        None => {
            table.inter_row_spacing = 1.0;
            table.inter_column_spacing = 0.0;
            for col in 0..table.num_columns() {
                table.set_alignment(ColumnAlignment::Left, col);
            }
            Ok(MathAtom::table(table))
        }
        Some(name @ ("eqalign" | "split" | "aligned")) => {
            check_columns(
                &table,
                2,
                format!("{} environment can only have 2 columns", name),
            )?;
            for row in table.cells.iter_mut() {
                if row.len() > 1 {
                    // spacing for relations starting the second column
                    row[1].insert(0, MathAtom::with_type(AtomType::Ordinary, ""));
                }
            }
            table.inter_row_spacing = 1.0;
            table.inter_column_spacing = 0.0;
            table.set_alignment(ColumnAlignment::Right, 0);
            table.set_alignment(ColumnAlignment::Left, 1);
            Ok(MathAtom::table(table))
        }
        Some(name @ ("displaylines" | "gather")) => {
            check_columns(
                &table,
                1,
                format!("{} environment can only have 1 column", name),
            )?;
            table.inter_row_spacing = 1.0;
            table.inter_column_spacing = 0.0;
            table.set_alignment(ColumnAlignment::Center, 0);
            Ok(MathAtom::table(table))
        }
        Some("eqnarray") => {
            check_columns(
                &table,
                3,
                "eqnarray environment can only have 3 columns".to_string(),
            )?;
            table.inter_row_spacing = 1.0;
            table.inter_column_spacing = 18.0;
            table.set_alignment(ColumnAlignment::Right, 0);
            table.set_alignment(ColumnAlignment::Center, 1);
            table.set_alignment(ColumnAlignment::Left, 2);
            Ok(MathAtom::table(table))
        }
        Some("cases") => {
            check_columns(
                &table,
                2,
                "cases environment can only have 2 columns".to_string(),
            )?;
            table.inter_row_spacing = 0.0;
            table.inter_column_spacing = 18.0;
            table.set_alignment(ColumnAlignment::Left, 0);
            table.set_alignment(ColumnAlignment::Left, 1);
            prefix_cells(&mut table, || MathAtom::style(LineStyle::Text));
            let space = MathAtom::space(3.0);
            let list = MathList::from_atoms(vec![space, MathAtom::table(table)]);
            Ok(delimited("{", ".", list))
        }
        Some(name) => Err(ParseError::new(
            ParseErrorKind::InvalidEnv,
            format!("Unknown environment: {}", name),
        )),
    }
}

fn prefix_cells(table: &mut Table, atom: impl Fn() -> MathAtom) {
    for row in table.cells.iter_mut() {
        for cell in row.iter_mut() {
            cell.insert(0, atom());
        }
    }
}

fn delimited(left: &str, right: &str, list: MathList) -> MathAtom {
    let mut inner = Inner::new(list);
    inner.set_left_boundary(symbols::boundary_atom(left));
    inner.set_right_boundary(symbols::boundary_atom(right));
    MathAtom::inner(inner)
}
