//! Splitting a string into tokens on matching characters.
//!
//! In strict mode every token is kept, including the empty ones produced by
//! leading, trailing or adjacent delimiters. Otherwise empty tokens are
//! dropped.

/// Decides which characters act as delimiters.
pub trait MatchChar {
    fn matches(&self, c: char) -> bool;
}

impl MatchChar for char {
    #[inline]
    fn matches(&self, c: char) -> bool {
        *self == c
    }
}

impl<F> MatchChar for F
where
    F: Fn(char) -> bool,
{
    #[inline]
    fn matches(&self, c: char) -> bool {
        self(c)
    }
}

/// Iterator over the tokens of a string; see [`split`].
#[derive(Clone, Debug)]
pub struct Split<'a, M> {
    rest: Option<&'a str>,
    matcher: M,
    strict: bool,
}

/// Splits `s` on every character accepted by `matcher`.
///
/// ```
/// use ordered_string_map::str_split::split;
///
/// let loose: Vec<&str> = split("a,,b,", ',', false).collect();
/// assert_eq!(loose, ["a", "b"]);
/// let strict: Vec<&str> = split("a,,b,", ',', true).collect();
/// assert_eq!(strict, ["a", "", "b", ""]);
/// ```
pub fn split<M: MatchChar>(s: &str, matcher: M, strict: bool) -> Split<'_, M> {
    Split {
        rest: Some(s),
        matcher,
        strict,
    }
}

/// Appends the tokens of `s` to `out` as owned strings.
pub fn split_to_vec<M: MatchChar>(s: &str, matcher: M, strict: bool, out: &mut Vec<String>) {
    out.extend(split(s, matcher, strict).map(str::to_owned));
}

impl<'a, M: MatchChar> Iterator for Split<'a, M> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let rest = self.rest?;
            let token = match rest.char_indices().find(|&(_, c)| self.matcher.matches(c)) {
                Some((pos, c)) => {
                    self.rest = Some(&rest[pos + c.len_utf8()..]);
                    &rest[..pos]
                }
                None => {
                    self.rest = None;
                    rest
                }
            };
            if self.strict || !token.is_empty() {
                return Some(token);
            }
        }
    }
}
