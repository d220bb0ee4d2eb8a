//! Math list model: atoms, lists, tables and their styles.

use std::fmt;

/// The type of an atom.
///
/// The order matters: types before [`AtomType::Boundary`] accept
/// sub/superscripts, the others don't.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AtomType {
    /// Ordinary symbol, e.g. `/`
    Ordinary,
    /// Number, e.g. `1`
    Number,
    /// Variable, e.g. `x`
    Variable,
    /// Large operator, e.g. `\sum`
    LargeOperator,
    /// Binary operator, e.g. `+`
    BinaryOperator,
    /// Unary operator, e.g. a leading `-`
    UnaryOperator,
    /// Relation, e.g. `=`
    Relation,
    /// Opening bracket
    Open,
    /// Closing bracket
    Close,
    /// Fraction
    Fraction,
    /// Radical, e.g. `\sqrt`
    Radical,
    /// Punctuation, e.g. `,`
    Punctuation,
    /// Placeholder square
    Placeholder,
    /// Inner list, with optional boundaries
    Inner,
    /// Underlined list
    Underline,
    /// Overlined list
    Overline,
    /// Accented list
    Accent,
    /// Boundary of an inner list, e.g. the `(` of `\left(`
    Boundary,
    /// Horizontal space
    Space,
    /// Line style change
    Style,
    /// Colored list
    Color,
    /// Colored list (`\textcolor`)
    TextColor,
    /// Table or matrix
    Table,
}

impl AtomType {
    /// Whether atoms of this type accept sub/superscripts
    pub fn supports_scripts(self) -> bool {
        self < AtomType::Boundary
    }

    /// Whether this is one of the types made of a single run of glyphs
    pub fn is_plain(self) -> bool {
        matches!(
            self,
            AtomType::Ordinary
                | AtomType::Number
                | AtomType::Variable
                | AtomType::BinaryOperator
                | AtomType::UnaryOperator
                | AtomType::Relation
                | AtomType::Open
                | AtomType::Close
                | AtomType::Punctuation
                | AtomType::Placeholder
        )
    }
}

impl fmt::Display for AtomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AtomType::Ordinary => "Ordinary",
            AtomType::Number => "Number",
            AtomType::Variable => "Variable",
            AtomType::LargeOperator => "Large Operator",
            AtomType::BinaryOperator => "Binary Operator",
            AtomType::UnaryOperator => "Unary Operator",
            AtomType::Relation => "Relation",
            AtomType::Open => "Open",
            AtomType::Close => "Close",
            AtomType::Fraction => "Fraction",
            AtomType::Radical => "Radical",
            AtomType::Punctuation => "Punctuation",
            AtomType::Placeholder => "Placeholder",
            AtomType::Inner => "Inner",
            AtomType::Underline => "Underline",
            AtomType::Overline => "Overline",
            AtomType::Accent => "Accent",
            AtomType::Boundary => "Boundary",
            AtomType::Space => "Space",
            AtomType::Style => "Style",
            AtomType::Color => "Color",
            AtomType::TextColor => "TextColor",
            AtomType::Table => "Table",
        };
        f.write_str(s)
    }
}

/// A range of atoms in the list before finalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Range {
    /// First index
    pub location: usize,
    /// Number of indices
    pub length: usize,
}

impl Range {
    /// Build a range
    pub const fn new(location: usize, length: usize) -> Self {
        Range { location, length }
    }

    /// One past the last index
    pub const fn max_range(&self) -> usize {
        self.location + self.length
    }

    /// Whether this is the unassigned (0, 0) range
    pub const fn is_zero(&self) -> bool {
        self.location == 0 && self.length == 0
    }

    /// The smallest range covering `self` and `other`
    pub fn union(&self, other: Range) -> Range {
        let start = self.location.min(other.location);
        let end = self.max_range().max(other.max_range());
        Range::new(start, end - start)
    }
}

/// Font style applied to letters and digits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Italic letters, upright digits
    #[default]
    Default,
    /// Upright
    Roman,
    /// Bold
    Bold,
    /// Caligraphic (script)
    Caligraphic,
    /// Monospace
    Typewriter,
    /// Italic
    Italic,
    /// Sans-serif
    SansSerif,
    /// Fraktur
    Fraktur,
    /// Double struck
    Blackboard,
    /// Bold italic
    BoldItalic,
}

/// Line style, from the largest to the smallest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LineStyle {
    /// Display style (own line)
    #[default]
    Display,
    /// Text style (inline)
    Text,
    /// First level script
    Script,
    /// Second level script
    ScriptScript,
}

impl LineStyle {
    /// The style of the scripts attached to an atom of this style
    pub fn script_style(self) -> LineStyle {
        match self {
            LineStyle::Display | LineStyle::Text => LineStyle::Script,
            LineStyle::Script | LineStyle::ScriptScript => LineStyle::ScriptScript,
        }
    }

    /// The style of numerator and denominator of a fraction of this style
    pub fn fraction_style(self) -> LineStyle {
        match self {
            LineStyle::Display => LineStyle::Text,
            LineStyle::Text => LineStyle::Script,
            LineStyle::Script | LineStyle::ScriptScript => LineStyle::ScriptScript,
        }
    }
}

/// Horizontal alignment of a table column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ColumnAlignment {
    /// Left aligned
    Left,
    /// Centered
    #[default]
    Center,
    /// Right aligned
    Right,
}

/// Optional super and subscript of an atom
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scripts {
    /// The superscript
    pub superscript: Option<MathList>,
    /// The subscript
    pub subscript: Option<MathList>,
}

impl Scripts {
    /// Whether neither script is set
    pub fn is_empty(&self) -> bool {
        self.superscript.is_none() && self.subscript.is_none()
    }
}

/// A fraction, with or without rule
#[derive(Debug, Clone, PartialEq)]
pub struct Fraction {
    /// Numerator
    pub numerator: MathList,
    /// Denominator
    pub denominator: MathList,
    /// Whether the fraction bar is drawn
    pub has_rule: bool,
    /// Delimiter on the left, e.g. `(` for `\choose`
    pub left_delim: Option<String>,
    /// Delimiter on the right
    pub right_delim: Option<String>,
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction {
            numerator: MathList::new(),
            denominator: MathList::new(),
            has_rule: true,
            left_delim: None,
            right_delim: None,
        }
    }
}

/// A radical (square root or n-th root)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Radical {
    /// Content under the root sign
    pub radicand: MathList,
    /// Degree of the root, `None` for square roots
    pub degree: Option<MathList>,
}

/// An inner list, optionally delimited by `\left` and `\right` boundaries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inner {
    /// The content
    pub inner: MathList,
    left_boundary: Option<MathAtom>,
    right_boundary: Option<MathAtom>,
}

impl Inner {
    /// Build an inner list without boundaries
    pub fn new(inner: MathList) -> Self {
        Inner {
            inner,
            left_boundary: None,
            right_boundary: None,
        }
    }

    /// The left boundary
    pub fn left_boundary(&self) -> Option<&MathAtom> {
        self.left_boundary.as_ref()
    }

    /// The right boundary
    pub fn right_boundary(&self) -> Option<&MathAtom> {
        self.right_boundary.as_ref()
    }

    /// Whether at least one boundary is set
    pub fn has_boundaries(&self) -> bool {
        self.left_boundary.is_some() || self.right_boundary.is_some()
    }

    /// Set the left boundary.
    ///
    /// # Panics
    /// If the atom is not of type [`AtomType::Boundary`]
    pub fn set_left_boundary(&mut self, boundary: Option<MathAtom>) {
        check_boundary(&boundary);
        self.left_boundary = boundary;
    }

    /// Set the right boundary.
    ///
    /// # Panics
    /// If the atom is not of type [`AtomType::Boundary`]
    pub fn set_right_boundary(&mut self, boundary: Option<MathAtom>) {
        check_boundary(&boundary);
        self.right_boundary = boundary;
    }

    pub(crate) fn boundaries_mut(&mut self) -> (Option<&mut MathAtom>, Option<&mut MathAtom>) {
        (self.left_boundary.as_mut(), self.right_boundary.as_mut())
    }
}

fn check_boundary(boundary: &Option<MathAtom>) {
    if let Some(b) = boundary {
        assert!(
            b.atom_type() == AtomType::Boundary,
            "Inner boundary must be of type Boundary, got {}",
            b.atom_type()
        );
    }
}

/// A list rendered with a color
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MathColor {
    /// The color as written in the input, e.g. `#ff0000`
    pub color: String,
    /// The colored content
    pub inner: MathList,
}

/// A table of math lists, used for matrices and aligned environments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Rows of cells. Rows may have different lengths.
    pub cells: Vec<Vec<MathList>>,
    alignments: Vec<ColumnAlignment>,
    /// Environment name, `None` for implicit tables
    pub environment: Option<String>,
    /// Additional spacing between rows, in jots
    pub inter_row_spacing: f32,
    /// Spacing between columns, in mu
    pub inter_column_spacing: f32,
}

impl Table {
    /// An empty table for the given environment
    pub fn new(environment: Option<&str>) -> Self {
        Table {
            environment: environment.map(str::to_string),
            ..Default::default()
        }
    }

    /// Set a cell, growing the table with empty cells as needed
    pub fn set_cell(&mut self, list: MathList, row: usize, column: usize) {
        if self.cells.len() <= row {
            self.cells.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.cells[row];
        if cells.len() <= column {
            cells.resize_with(column + 1, MathList::new);
        }
        cells[column] = list;
    }

    /// Set the alignment of a column, columns in between default to center
    pub fn set_alignment(&mut self, alignment: ColumnAlignment, column: usize) {
        if self.alignments.len() <= column {
            self.alignments
                .resize(column + 1, ColumnAlignment::Center);
        }
        self.alignments[column] = alignment;
    }

    /// Alignment of a column, center if never set
    pub fn alignment(&self, column: usize) -> ColumnAlignment {
        self.alignments
            .get(column)
            .copied()
            .unwrap_or(ColumnAlignment::Center)
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns, which is the length of the longest row
    pub fn num_columns(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Type specific content of an atom.
///
/// Only the variants of types accepting scripts carry a [`Scripts`].
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum AtomKind {
    Ordinary(Scripts),
    Number(Scripts),
    Variable(Scripts),
    BinaryOperator(Scripts),
    UnaryOperator(Scripts),
    Relation(Scripts),
    Open(Scripts),
    Close(Scripts),
    Punctuation(Scripts),
    Placeholder(Scripts),
    LargeOperator { limits: bool, scripts: Scripts },
    Fraction(Box<Fraction>, Scripts),
    Radical(Box<Radical>, Scripts),
    Inner(Box<Inner>, Scripts),
    Underline(MathList, Scripts),
    Overline(MathList, Scripts),
    /// Accent mark is the atom nucleus, the accentee is the list.
    Accent(MathList, Scripts),
    Boundary,
    /// Space in mu
    Space(f32),
    Style(LineStyle),
    Color(MathColor),
    TextColor(MathColor),
    Table(Box<Table>),
}

impl AtomKind {
    fn plain(ty: AtomType, scripts: Scripts) -> AtomKind {
        match ty {
            AtomType::Ordinary => AtomKind::Ordinary(scripts),
            AtomType::Number => AtomKind::Number(scripts),
            AtomType::Variable => AtomKind::Variable(scripts),
            AtomType::BinaryOperator => AtomKind::BinaryOperator(scripts),
            AtomType::UnaryOperator => AtomKind::UnaryOperator(scripts),
            AtomType::Relation => AtomKind::Relation(scripts),
            AtomType::Open => AtomKind::Open(scripts),
            AtomType::Close => AtomKind::Close(scripts),
            AtomType::Punctuation => AtomKind::Punctuation(scripts),
            AtomType::Placeholder => AtomKind::Placeholder(scripts),
            _ => panic!("{} is not a plain atom type", ty),
        }
    }

    /// The type of this atom kind
    pub fn atom_type(&self) -> AtomType {
        match self {
            AtomKind::Ordinary(_) => AtomType::Ordinary,
            AtomKind::Number(_) => AtomType::Number,
            AtomKind::Variable(_) => AtomType::Variable,
            AtomKind::BinaryOperator(_) => AtomType::BinaryOperator,
            AtomKind::UnaryOperator(_) => AtomType::UnaryOperator,
            AtomKind::Relation(_) => AtomType::Relation,
            AtomKind::Open(_) => AtomType::Open,
            AtomKind::Close(_) => AtomType::Close,
            AtomKind::Punctuation(_) => AtomType::Punctuation,
            AtomKind::Placeholder(_) => AtomType::Placeholder,
            AtomKind::LargeOperator { .. } => AtomType::LargeOperator,
            AtomKind::Fraction(..) => AtomType::Fraction,
            AtomKind::Radical(..) => AtomType::Radical,
            AtomKind::Inner(..) => AtomType::Inner,
            AtomKind::Underline(..) => AtomType::Underline,
            AtomKind::Overline(..) => AtomType::Overline,
            AtomKind::Accent(..) => AtomType::Accent,
            AtomKind::Boundary => AtomType::Boundary,
            AtomKind::Space(_) => AtomType::Space,
            AtomKind::Style(_) => AtomType::Style,
            AtomKind::Color(_) => AtomType::Color,
            AtomKind::TextColor(_) => AtomType::TextColor,
            AtomKind::Table(_) => AtomType::Table,
        }
    }

    /// The scripts, if this kind accepts them
    pub fn scripts(&self) -> Option<&Scripts> {
        match self {
            AtomKind::Ordinary(s)
            | AtomKind::Number(s)
            | AtomKind::Variable(s)
            | AtomKind::BinaryOperator(s)
            | AtomKind::UnaryOperator(s)
            | AtomKind::Relation(s)
            | AtomKind::Open(s)
            | AtomKind::Close(s)
            | AtomKind::Punctuation(s)
            | AtomKind::Placeholder(s)
            | AtomKind::LargeOperator { scripts: s, .. }
            | AtomKind::Fraction(_, s)
            | AtomKind::Radical(_, s)
            | AtomKind::Inner(_, s)
            | AtomKind::Underline(_, s)
            | AtomKind::Overline(_, s)
            | AtomKind::Accent(_, s) => Some(s),
            AtomKind::Boundary
            | AtomKind::Space(_)
            | AtomKind::Style(_)
            | AtomKind::Color(_)
            | AtomKind::TextColor(_)
            | AtomKind::Table(_) => None,
        }
    }

    /// The scripts, if this kind accepts them
    pub fn scripts_mut(&mut self) -> Option<&mut Scripts> {
        match self {
            AtomKind::Ordinary(s)
            | AtomKind::Number(s)
            | AtomKind::Variable(s)
            | AtomKind::BinaryOperator(s)
            | AtomKind::UnaryOperator(s)
            | AtomKind::Relation(s)
            | AtomKind::Open(s)
            | AtomKind::Close(s)
            | AtomKind::Punctuation(s)
            | AtomKind::Placeholder(s)
            | AtomKind::LargeOperator { scripts: s, .. }
            | AtomKind::Fraction(_, s)
            | AtomKind::Radical(_, s)
            | AtomKind::Inner(_, s)
            | AtomKind::Underline(_, s)
            | AtomKind::Overline(_, s)
            | AtomKind::Accent(_, s) => Some(s),
            AtomKind::Boundary
            | AtomKind::Space(_)
            | AtomKind::Style(_)
            | AtomKind::Color(_)
            | AtomKind::TextColor(_)
            | AtomKind::Table(_) => None,
        }
    }
}

/// One node of a math list
#[derive(Debug, Clone, PartialEq)]
pub struct MathAtom {
    /// Text of the atom, possibly several characters after fusion.
    /// Empty for atoms whose content is held by their kind.
    pub nucleus: String,
    /// Font style of letters and digits of the nucleus
    pub font_style: FontStyle,
    /// Range of this atom in the list before finalization
    pub index_range: Range,
    /// Atoms that were fused into this one, in order
    pub fused_atoms: Vec<MathAtom>,
    /// Type and type specific content
    pub kind: AtomKind,
}

impl MathAtom {
    fn from_kind(kind: AtomKind, nucleus: impl Into<String>) -> Self {
        MathAtom {
            nucleus: nucleus.into(),
            font_style: FontStyle::Default,
            index_range: Range::default(),
            fused_atoms: Vec::new(),
            kind,
        }
    }

    /// Build an atom of any type with default content for that type.
    pub fn with_type(ty: AtomType, nucleus: impl Into<String>) -> Self {
        let kind = match ty {
            AtomType::LargeOperator => AtomKind::LargeOperator {
                limits: false,
                scripts: Scripts::default(),
            },
            AtomType::Fraction => AtomKind::Fraction(Box::default(), Scripts::default()),
            AtomType::Radical => AtomKind::Radical(Box::default(), Scripts::default()),
            AtomType::Inner => AtomKind::Inner(Box::default(), Scripts::default()),
            AtomType::Underline => AtomKind::Underline(MathList::new(), Scripts::default()),
            AtomType::Overline => AtomKind::Overline(MathList::new(), Scripts::default()),
            AtomType::Accent => AtomKind::Accent(MathList::new(), Scripts::default()),
            AtomType::Boundary => AtomKind::Boundary,
            AtomType::Space => AtomKind::Space(0.0),
            AtomType::Style => AtomKind::Style(LineStyle::Display),
            AtomType::Color => AtomKind::Color(MathColor::default()),
            AtomType::TextColor => AtomKind::TextColor(MathColor::default()),
            AtomType::Table => AtomKind::Table(Box::default()),
            ty => AtomKind::plain(ty, Scripts::default()),
        };
        match ty {
            AtomType::Fraction
            | AtomType::Radical
            | AtomType::Inner
            | AtomType::Underline
            | AtomType::Overline
            | AtomType::Space
            | AtomType::Style
            | AtomType::Color
            | AtomType::TextColor
            | AtomType::Table => MathAtom::from_kind(kind, ""),
            _ => MathAtom::from_kind(kind, nucleus),
        }
    }

    /// A large operator such as `\sum` or `\sin`
    pub fn large_operator(name: impl Into<String>, limits: bool) -> Self {
        MathAtom::from_kind(
            AtomKind::LargeOperator {
                limits,
                scripts: Scripts::default(),
            },
            name,
        )
    }

    /// A fraction
    pub fn fraction(fraction: Fraction) -> Self {
        MathAtom::from_kind(AtomKind::Fraction(Box::new(fraction), Scripts::default()), "")
    }

    /// A radical
    pub fn radical(radical: Radical) -> Self {
        MathAtom::from_kind(AtomKind::Radical(Box::new(radical), Scripts::default()), "")
    }

    /// An inner list
    pub fn inner(inner: Inner) -> Self {
        MathAtom::from_kind(AtomKind::Inner(Box::new(inner), Scripts::default()), "")
    }

    /// An overlined list
    pub fn overline(inner: MathList) -> Self {
        MathAtom::from_kind(AtomKind::Overline(inner, Scripts::default()), "")
    }

    /// An underlined list
    pub fn underline(inner: MathList) -> Self {
        MathAtom::from_kind(AtomKind::Underline(inner, Scripts::default()), "")
    }

    /// An accent mark over a list
    pub fn accent(mark: impl Into<String>, inner: MathList) -> Self {
        MathAtom::from_kind(AtomKind::Accent(inner, Scripts::default()), mark)
    }

    /// A boundary for an inner list
    pub fn boundary(delim: impl Into<String>) -> Self {
        MathAtom::from_kind(AtomKind::Boundary, delim)
    }

    /// A horizontal space in mu
    pub fn space(mu: f32) -> Self {
        MathAtom::from_kind(AtomKind::Space(mu), "")
    }

    /// A line style change
    pub fn style(style: LineStyle) -> Self {
        MathAtom::from_kind(AtomKind::Style(style), "")
    }

    /// A colored list (`\color`)
    pub fn color(color: impl Into<String>, inner: MathList) -> Self {
        MathAtom::from_kind(
            AtomKind::Color(MathColor {
                color: color.into(),
                inner,
            }),
            "",
        )
    }

    /// A colored list (`\textcolor`)
    pub fn text_color(color: impl Into<String>, inner: MathList) -> Self {
        MathAtom::from_kind(
            AtomKind::TextColor(MathColor {
                color: color.into(),
                inner,
            }),
            "",
        )
    }

    /// A table
    pub fn table(table: Table) -> Self {
        MathAtom::from_kind(AtomKind::Table(Box::new(table)), "")
    }

    /// The atom for a single input character, `None` if the character
    /// cannot be used unescaped.
    pub fn for_character(ch: char) -> Option<MathAtom> {
        let code = ch as u32;
        if !(0x21..=0x7E).contains(&code) {
            return None;
        }
        let atom = match ch {
            '$' | '%' | '#' | '&' | '~' | '\'' | '^' | '_' | '{' | '}' | '\\' => return None,
            '(' | '[' => MathAtom::with_type(AtomType::Open, ch),
            ')' | ']' | '!' | '?' => MathAtom::with_type(AtomType::Close, ch),
            ',' | ';' => MathAtom::with_type(AtomType::Punctuation, ch),
            '=' | '>' | '<' => MathAtom::with_type(AtomType::Relation, ch),
            ':' => MathAtom::with_type(AtomType::Relation, '\u{2236}'),
            '-' => MathAtom::with_type(AtomType::BinaryOperator, '\u{2212}'),
            '+' | '*' => MathAtom::with_type(AtomType::BinaryOperator, ch),
            '.' | '0'..='9' => MathAtom::with_type(AtomType::Number, ch),
            'a'..='z' | 'A'..='Z' => MathAtom::with_type(AtomType::Variable, ch),
            _ => MathAtom::with_type(AtomType::Ordinary, ch),
        };
        Some(atom)
    }

    /// The type of this atom
    pub fn atom_type(&self) -> AtomType {
        self.kind.atom_type()
    }

    /// Change the type of a plain atom, keeping its scripts.
    ///
    /// # Panics
    /// If the current or the new type is not a plain type
    pub fn set_type(&mut self, ty: AtomType) {
        let current = self.atom_type();
        assert!(current.is_plain(), "Cannot change type of {} atom", current);
        let scripts = self.take_scripts();
        self.kind = AtomKind::plain(ty, scripts);
    }

    /// The scripts, `None` if this atom does not support them
    pub fn scripts(&self) -> Option<&Scripts> {
        self.kind.scripts()
    }

    /// The superscript
    pub fn superscript(&self) -> Option<&MathList> {
        self.scripts().and_then(|s| s.superscript.as_ref())
    }

    /// The subscript
    pub fn subscript(&self) -> Option<&MathList> {
        self.scripts().and_then(|s| s.subscript.as_ref())
    }

    /// Whether a super or subscript is set
    pub fn has_scripts(&self) -> bool {
        self.scripts().is_some_and(|s| !s.is_empty())
    }

    /// Set the superscript.
    ///
    /// # Panics
    /// If this atom does not support scripts
    pub fn set_superscript(&mut self, list: Option<MathList>) {
        self.scripts_or_panic("Superscripts").superscript = list;
    }

    /// Set the subscript.
    ///
    /// # Panics
    /// If this atom does not support scripts
    pub fn set_subscript(&mut self, list: Option<MathList>) {
        self.scripts_or_panic("Subscripts").subscript = list;
    }

    /// Remove and return the scripts, empty if not supported
    pub fn take_scripts(&mut self) -> Scripts {
        self.kind
            .scripts_mut()
            .map(std::mem::take)
            .unwrap_or_default()
    }

    fn scripts_or_panic(&mut self, what: &str) -> &mut Scripts {
        let ty = self.atom_type();
        match self.kind.scripts_mut() {
            Some(s) => s,
            None => panic!("{} not allowed for atom of type {}", what, ty),
        }
    }

    /// Fuse `other` into this atom.
    ///
    /// The nucleus is concatenated, the range extended and the scripts of
    /// `other` are adopted.
    ///
    /// # Panics
    /// If this atom has scripts or if the types differ.
    pub fn fuse(&mut self, other: MathAtom) {
        assert!(
            self.subscript().is_none(),
            "Cannot fuse into an atom which has a subscript: {:?}",
            self.nucleus
        );
        assert!(
            self.superscript().is_none(),
            "Cannot fuse into an atom which has a superscript: {:?}",
            self.nucleus
        );
        assert!(
            self.atom_type() == other.atom_type(),
            "Only atoms of the same type can be fused: {} {}",
            self.atom_type(),
            other.atom_type()
        );

        if self.fused_atoms.is_empty() {
            let mut seed = self.clone();
            seed.fused_atoms.clear();
            self.fused_atoms.push(seed);
        }
        let mut other = other;
        let scripts = other.scripts().cloned().unwrap_or_default();
        self.nucleus.push_str(&other.nucleus);
        self.index_range.length += other.index_range.length;
        if other.fused_atoms.is_empty() {
            self.fused_atoms.push(other);
        } else {
            self.fused_atoms.append(&mut other.fused_atoms);
        }
        if let Some(s) = self.kind.scripts_mut() {
            *s = scripts;
        }
    }

    /// Whether a binary operator following `prev` must be read as unary
    pub fn is_not_binary_operator(prev: Option<&MathAtom>) -> bool {
        match prev {
            None => true,
            Some(prev) => matches!(
                prev.atom_type(),
                AtomType::BinaryOperator
                    | AtomType::Relation
                    | AtomType::Open
                    | AtomType::Punctuation
                    | AtomType::LargeOperator
            ),
        }
    }
}

/// An ordered list of atoms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MathList {
    /// The atoms
    pub atoms: Vec<MathAtom>,
}

impl MathList {
    /// An empty list
    pub fn new() -> Self {
        MathList { atoms: Vec::new() }
    }

    /// A list of the given atoms
    pub fn from_atoms(atoms: Vec<MathAtom>) -> Self {
        for atom in &atoms {
            check_list_atom(atom);
        }
        MathList { atoms }
    }

    /// A list with one atom per character, skipping characters that
    /// have no atom
    pub fn from_chars(chars: &str) -> Self {
        chars.chars().filter_map(MathAtom::for_character).collect()
    }

    /// Append an atom.
    ///
    /// # Panics
    /// If the atom is a boundary
    pub fn push(&mut self, atom: MathAtom) {
        check_list_atom(&atom);
        self.atoms.push(atom);
    }

    /// Insert an atom at index.
    ///
    /// # Panics
    /// If the atom is a boundary or if index is out of bounds
    pub fn insert(&mut self, index: usize, atom: MathAtom) {
        check_list_atom(&atom);
        self.atoms.insert(index, atom);
    }

    /// Move all atoms of `other` at the end of this list
    pub fn append(&mut self, other: MathList) {
        self.atoms.extend(other.atoms);
    }

    /// Number of atoms
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Whether the list has no atom
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Iterate over the atoms
    pub fn iter(&self) -> std::slice::Iter<'_, MathAtom> {
        self.atoms.iter()
    }

    /// The last atom
    pub fn last(&self) -> Option<&MathAtom> {
        self.atoms.last()
    }

    /// The last atom
    pub fn last_mut(&mut self) -> Option<&mut MathAtom> {
        self.atoms.last_mut()
    }
}

fn check_list_atom(atom: &MathAtom) {
    assert!(
        atom.atom_type() != AtomType::Boundary,
        "Cannot add atom of type {} in a math list",
        atom.atom_type()
    );
}

impl FromIterator<MathAtom> for MathList {
    fn from_iter<T: IntoIterator<Item = MathAtom>>(iter: T) -> Self {
        let mut list = MathList::new();
        for atom in iter {
            list.push(atom);
        }
        list
    }
}

impl<'a> IntoIterator for &'a MathList {
    type Item = &'a MathAtom;
    type IntoIter = std::slice::Iter<'a, MathAtom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

impl IntoIterator for MathList {
    type Item = MathAtom;
    type IntoIter = std::vec::IntoIter<MathAtom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.into_iter()
    }
}
