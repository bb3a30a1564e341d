//! The `typ`/`min`/`max` corner axis and the corner-valued scalar triple.

use std::fmt;

/// One of the three IBIS process/voltage/temperature corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    Typ,
    Min,
    Max,
}

impl Corner {
    pub const ALL: [Corner; 3] = [Corner::Typ, Corner::Min, Corner::Max];

    pub fn suffix(self) -> &'static str {
        match self {
            Corner::Typ => "typ",
            Corner::Min => "min",
            Corner::Max => "max",
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A value that varies by corner, each entry optionally unset.
///
/// `None` is the distinguished "unset" sentinel rather than a
/// magic number, so a legitimately-zero electrical quantity never collides
/// with "not available".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VCorner<T> {
    pub typ: Option<T>,
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> VCorner<T> {
    pub fn all_unset() -> Self {
        Self {
            typ: None,
            min: None,
            max: None,
        }
    }

    pub fn get(&self, corner: Corner) -> Option<&T> {
        match corner {
            Corner::Typ => self.typ.as_ref(),
            Corner::Min => self.min.as_ref(),
            Corner::Max => self.max.as_ref(),
        }
    }

    pub fn set(&mut self, corner: Corner, value: T) {
        match corner {
            Corner::Typ => self.typ = Some(value),
            Corner::Min => self.min = Some(value),
            Corner::Max => self.max = Some(value),
        }
    }

    pub fn is_fully_unset(&self) -> bool {
        self.typ.is_none() && self.min.is_none() && self.max.is_none()
    }

    /// Layer `self` over `fallback`: any field unset in `self` is filled
    /// from `fallback`. Used by hierarchical defaults resolution
    /// (Model -> Component -> Document); running it twice against the same
    /// fallback is a no-op.
    pub fn or(self, fallback: Self) -> Self
    where
        T: Clone,
    {
        Self {
            typ: self.typ.or(fallback.typ),
            min: self.min.or(fallback.min),
            max: self.max.or(fallback.max),
        }
    }
}

impl<T: Copy> VCorner<T> {
    pub fn uniform(value: T) -> Self {
        Self {
            typ: Some(value),
            min: Some(value),
            max: Some(value),
        }
    }

    pub fn get_copied(&self, corner: Corner) -> Option<T> {
        self.get(corner).copied()
    }
}

impl VCorner<f64> {
    /// `min <= typ <= max`, ignoring unset fields. This is
    /// checked everywhere *except* the temperature-range field, where
    /// min/max instead encode slowest/fastest process corner and may
    /// legitimately be numerically reversed; callers skip this check there.
    pub fn is_ordered(&self) -> bool {
        let lo = self.min.unwrap_or(f64::NEG_INFINITY);
        let mid = self.typ.unwrap_or(lo);
        let hi = self.max.unwrap_or(f64::INFINITY);
        lo <= mid && mid <= hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_fills_unset_fields_only() {
        let model = VCorner {
            typ: Some(1.0),
            min: None,
            max: None,
        };
        let component = VCorner {
            typ: Some(9.0),
            min: Some(2.0),
            max: Some(3.0),
        };
        let resolved = model.or(component);
        assert_eq!(resolved.typ, Some(1.0));
        assert_eq!(resolved.min, Some(2.0));
        assert_eq!(resolved.max, Some(3.0));
    }

    #[test]
    fn or_is_idempotent() {
        let model = VCorner {
            typ: Some(1.0),
            min: None,
            max: None,
        };
        let component = VCorner::uniform(5.0);
        let once = model.clone().or(component.clone());
        let twice = once.clone().or(component);
        assert_eq!(once, twice);
    }

    #[test]
    fn is_ordered_checks_corner_monotonicity() {
        assert!(VCorner::<f64>::uniform(1.0).is_ordered());
        assert!(
            VCorner {
                typ: Some(1.0),
                min: Some(0.5),
                max: Some(1.5)
            }
            .is_ordered()
        );
        assert!(
            !VCorner {
                typ: Some(1.0),
                min: Some(2.0),
                max: Some(3.0)
            }
            .is_ordered()
        );
    }
}
