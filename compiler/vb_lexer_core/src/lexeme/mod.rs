//! Recognizers for the lexemes the scanner produces.
//!
//! Each recognizer takes the full text of one [`RawTag::Lexeme`](crate::RawTag)
//! and either returns a typed view of it or `None`. Recognizers only check
//! shape. Range checks (bits 0 to 31, constants up to 32 bits) belong to the
//! classifier, which reports them with line numbers, so numbers here are
//! parsed with saturation instead of failing.
//!
//! | Lexeme | Examples |
//! |---|---|
//! | scalar | `a`, `a0`, `~b12`, `*go` |
//! | vector | `a[3..0]`, `~d[0.2.6]`, `a[]` |
//! | constant | `5`, `'hF`, `4'b101`, `8'd200`, `~3'7` |
//! | operator | `=`, `<=`, `<=@clk`, `\|`, `^`, `==`, `+`, `-`, `~~` |
//! | formatter | `%b`, `%D`, `%u`, `%h` |
//! | instantiation | `adder.u1` |

/// Leading run of `~` (negation) and `*` (independent) markers.
fn split_markers(text: &str) -> (&str, &str) {
    let end = text
        .bytes()
        .position(|b| b != b'~' && b != b'*')
        .unwrap_or(text.len());
    text.split_at(end)
}

/// Parse ASCII digits, saturating at `u32::MAX`.
fn parse_u32(digits: &str) -> u32 {
    digits.bytes().fold(0u32, |acc, b| {
        acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
    })
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// `[a-zA-Z][a-zA-Z0-9]*`
fn is_identifier(text: &str) -> bool {
    let mut bytes = text.bytes();
    bytes.next().is_some_and(|b| b.is_ascii_alphabetic())
        && bytes.all(|b| b.is_ascii_alphanumeric())
}

/// Marker prefix shared by scalars, vectors and constants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Markers<'a>(pub &'a str);

impl<'a> Markers<'a> {
    /// An odd number of `~`.
    pub fn is_negated(self) -> bool {
        self.0.bytes().filter(|&b| b == b'~').count() % 2 == 1
    }

    /// Any `~` at all.
    pub fn has_negation(self) -> bool {
        self.0.contains('~')
    }

    /// Any `*`.
    pub fn is_starred(self) -> bool {
        self.0.contains('*')
    }

    pub fn as_str(self) -> &'a str {
        self.0
    }
}

// === Scalars ===

/// A single bit: `name` with an optional trailing bit index.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Scalar<'a> {
    pub markers: Markers<'a>,
    /// Name without the trailing bit digits.
    pub name: &'a str,
    pub bit: Option<u32>,
    /// Name and bit digits, without markers: the variable's identity.
    pub ident: &'a str,
}

/// Recognize `[~*]*name[bit]`.
pub fn scalar(text: &str) -> Option<Scalar<'_>> {
    let (markers, ident) = split_markers(text);
    if !is_identifier(ident) {
        return None;
    }
    let name = ident.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &ident[name.len()..];
    Some(Scalar {
        markers: Markers(markers),
        name,
        bit: (!digits.is_empty()).then(|| parse_u32(digits)),
        ident,
    })
}

// === Vectors ===

/// Explicit bounds of a vector, `[left..right]` or `[left.step.right]`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct VectorRange {
    pub left: u32,
    pub step: Option<u32>,
    pub right: u32,
}

impl VectorRange {
    /// Bit indexes in written order, from `left` toward `right`.
    pub fn bits(self) -> Vec<u32> {
        let step = self.step.unwrap_or(1).max(1) as usize;
        if self.left < self.right {
            (self.left..=self.right).step_by(step).collect()
        } else {
            (self.right..=self.left).rev().step_by(step).collect()
        }
    }
}

/// A family of bits: `name[L..R]`, `name[L.S.R]` or `name[]`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Vector<'a> {
    pub markers: Markers<'a>,
    pub name: &'a str,
    /// `None` for `name[]`, whose bits come from earlier uses of `name`.
    pub range: Option<VectorRange>,
}

impl Vector<'_> {
    /// Vector names can't end in a digit (`a1[3..0]` would collide with bit names).
    pub fn name_ends_in_digit(&self) -> bool {
        self.name.bytes().last().is_some_and(|b| b.is_ascii_digit())
    }
}

/// Recognize `[~*]*name[...]`.
pub fn vector(text: &str) -> Option<Vector<'_>> {
    let (markers, rest) = split_markers(text);
    let open = rest.find('[')?;
    let (name, index) = rest.split_at(open);
    let inner = index.strip_prefix('[')?.strip_suffix(']')?;
    if !is_identifier(name) {
        return None;
    }

    let range = if inner.is_empty() {
        None
    } else {
        let mut parts = inner.split('.');
        let (left, step, right) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || !is_digits(left) || !is_digits(right) {
            return None;
        }
        if !step.is_empty() && !is_digits(step) {
            return None;
        }
        Some(VectorRange {
            left: parse_u32(left),
            step: (!step.is_empty()).then(|| parse_u32(step)),
            right: parse_u32(right),
        })
    };

    Some(Vector {
        markers: Markers(markers),
        name,
        range,
    })
}

// === Constants ===

/// Radix of a constant's digits.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Radix {
    Binary,
    Decimal,
    Hex,
}

impl Radix {
    fn base(self) -> u64 {
        match self {
            Radix::Binary => 2,
            Radix::Decimal => 10,
            Radix::Hex => 16,
        }
    }
}

/// A numeric constant `[~]*[width]'[format]digits` or plain `digits`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Constant<'a> {
    pub markers: Markers<'a>,
    /// Explicit bit count before the `'`.
    pub width: Option<u32>,
    pub radix: Radix,
    pub digits: &'a str,
    /// Text without markers.
    pub literal: &'a str,
}

impl Constant<'_> {
    /// Numeric value, or `None` when it doesn't fit in 64 bits.
    pub fn value(&self) -> Option<u64> {
        let base = self.radix.base();
        self.digits.chars().try_fold(0u64, |acc, c| {
            let digit = u64::from(c.to_digit(16)?);
            acc.checked_mul(base)?.checked_add(digit)
        })
    }

    /// Bits needed to write the constant without an explicit width.
    ///
    /// Binary constants keep their written leading zeros; decimal and hex
    /// constants use their minimal binary length (at least 1).
    pub fn natural_width(&self) -> u32 {
        match self.radix {
            Radix::Binary => u32::try_from(self.digits.len()).unwrap_or(u32::MAX),
            Radix::Decimal | Radix::Hex => match self.value() {
                Some(value) => (u64::BITS - value.leading_zeros()).max(1),
                None => u32::MAX,
            },
        }
    }

    /// Width the constant expands to.
    pub fn bit_count(&self) -> u32 {
        self.width.unwrap_or_else(|| self.natural_width())
    }

    /// A bare `0` or `1`, which needs no expansion.
    pub fn is_single_bit(&self) -> bool {
        self.width.is_none() && matches!(self.literal, "0" | "1")
    }

    /// Bits MSB first, left-padded with zeros to [`bit_count`](Self::bit_count).
    ///
    /// A width narrower than the natural width keeps the low bits; the
    /// classifier rejects such constants before anything expands them.
    pub fn to_bits(&self) -> Vec<bool> {
        let width = self.bit_count();
        if self.radix == Radix::Binary {
            let written: Vec<bool> = self.digits.bytes().map(|b| b == b'1').collect();
            let width = width as usize;
            if written.len() >= width {
                return written[written.len() - width..].to_vec();
            }
            let mut bits = vec![false; width - written.len()];
            bits.extend(written);
            return bits;
        }
        let value = self.value().unwrap_or(u64::MAX);
        (0..width)
            .rev()
            .map(|i| i < u64::BITS && (value >> i) & 1 == 1)
            .collect()
    }
}

/// Recognize a constant. `*` is never valid on a constant.
pub fn constant(text: &str) -> Option<Constant<'_>> {
    let (markers, literal) = split_markers(text);
    if markers.contains('*') {
        return None;
    }

    let (width, radix, digits) = match literal.split_once('\'') {
        None => (None, Radix::Decimal, literal),
        Some((width, rest)) => {
            if !width.is_empty() && !is_digits(width) {
                return None;
            }
            let (radix, digits) = match rest.as_bytes().first() {
                Some(b'b' | b'B') => (Radix::Binary, &rest[1..]),
                Some(b'h' | b'H') => (Radix::Hex, &rest[1..]),
                Some(b'd' | b'D') => (Radix::Decimal, &rest[1..]),
                _ => (Radix::Decimal, rest),
            };
            let width = (!width.is_empty()).then(|| parse_u32(width));
            (width, radix, digits)
        }
    };

    let valid_digit = |b: u8| match radix {
        Radix::Binary => matches!(b, b'0' | b'1'),
        Radix::Decimal => b.is_ascii_digit(),
        Radix::Hex => b.is_ascii_hexdigit(),
    };
    if digits.is_empty() || !digits.bytes().all(valid_digit) {
        return None;
    }

    Some(Constant {
        markers: Markers(markers),
        width,
        radix,
        digits,
        literal,
    })
}

// === Operators ===

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator<'a> {
    /// `=`
    Assign,
    /// `<=`, optionally `<=@alt` for an alternate clock.
    Clock { alt_clock: Option<Scalar<'a>> },
    /// `|`
    Or,
    /// `^`
    Xor,
    /// `==`
    Equal,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// A detached run of `~`, which must be followed by `(` or `{`.
    Negation { count: u32 },
}

impl Operator<'_> {
    pub fn is_math(self) -> bool {
        matches!(self, Operator::Plus | Operator::Minus)
    }

    pub fn is_assignment(self) -> bool {
        matches!(self, Operator::Assign | Operator::Clock { .. })
    }
}

pub fn operator(text: &str) -> Option<Operator<'_>> {
    match text {
        "=" => Some(Operator::Assign),
        "|" => Some(Operator::Or),
        "^" => Some(Operator::Xor),
        "==" => Some(Operator::Equal),
        "+" => Some(Operator::Plus),
        "-" => Some(Operator::Minus),
        "<=" => Some(Operator::Clock { alt_clock: None }),
        _ if !text.is_empty() && text.bytes().all(|b| b == b'~') => Some(Operator::Negation {
            count: u32::try_from(text.len()).unwrap_or(u32::MAX),
        }),
        _ => {
            let alt = text.strip_prefix("<=@")?;
            let clock = scalar(alt).filter(|s| s.markers.as_str().is_empty())?;
            Some(Operator::Clock {
                alt_clock: Some(clock),
            })
        }
    }
}

// === Formatters ===

/// Display format of a format specifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Format {
    /// `%b`
    Binary,
    /// `%u`
    Unsigned,
    /// `%d`, two's complement.
    Decimal,
    /// `%h`
    Hex,
}

pub fn formatter(text: &str) -> Option<Format> {
    match text.strip_prefix('%')? {
        "b" | "B" => Some(Format::Binary),
        "u" | "U" => Some(Format::Unsigned),
        "d" | "D" => Some(Format::Decimal),
        "h" | "H" => Some(Format::Hex),
        _ => None,
    }
}

// === Instantiations ===

/// `design.instance`, the head of a submodule instantiation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Instantiation<'a> {
    pub design: &'a str,
    pub instance: &'a str,
}

pub fn instantiation(text: &str) -> Option<Instantiation<'_>> {
    let (design, instance) = text.split_once('.')?;
    let design_ok =
        !design.is_empty() && design.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    let instance_ok = !instance.is_empty() && instance.bytes().all(|b| b.is_ascii_alphanumeric());
    (design_ok && instance_ok).then_some(Instantiation { design, instance })
}
