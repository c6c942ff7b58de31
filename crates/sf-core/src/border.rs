/// How reads outside an axis `[0, len)` are answered.
#[derive(Debug, Clone, PartialEq)]
pub enum BorderMode<T> {
    /// Repeat the edge element.
    Clamp,
    /// Fill with a fixed value.
    Constant(T),
    /// Mirror around the edge elements without repeating them.
    Reflect101,
}

impl<T> BorderMode<T> {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Constant(_) => "constant",
            Self::Reflect101 => "reflect101",
        }
    }
}

/// Maps a possibly out-of-range index onto `[0, len)`.
///
/// Returns `None` for constant borders (the caller substitutes the fill
/// value) and for empty axes.
pub fn map_index<T>(i: isize, len: usize, mode: &BorderMode<T>) -> Option<usize> {
    match mode {
        BorderMode::Constant(_) => None,
        BorderMode::Clamp => {
            if len == 0 {
                return None;
            }
            if i < 0 {
                Some(0)
            } else {
                Some((i as usize).min(len - 1))
            }
        }
        BorderMode::Reflect101 => {
            if len == 0 {
                return None;
            }
            if len == 1 {
                return Some(0);
            }

            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len { Some(r) } else { Some(period as usize - r) }
        }
    }
}
