//! Entity index <-> RGB color codec.
//!
//! Indices are written base [`BASE`] across the three channels, each digit
//! shifted up by [`OFFSET`]. Channel values inside the `OFFSET` margins at
//! either end of the 8-bit range are never produced by [`encode`], so pixels
//! that were blended or anti-aliased toward black or white fall into the
//! margins and are rejected instead of decoding to a neighbor's index.

use crate::error::MeshViewError;

/// An 8-bit RGB triple.
pub type Rgb = [u8; 3];

/// Reserved margin at each end of the channel range.
pub const OFFSET: u8 = 5;

/// Usable values per channel: `OFFSET ..= OFFSET + BASE - 1`.
pub const BASE: usize = 245;

/// Largest encodable index, `BASE³ - 1`.
pub const MAX_INDEX: usize = BASE * BASE * BASE - 1;

/// Clear color of pick targets. Outside the valid range, decodes to
/// [`Decoded::NoHit`].
pub const BACKGROUND: Rgb = [255, 255, 255];

const HIGHEST: u8 = OFFSET + (BASE - 1) as u8;

/// Result of decoding one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A valid entity index.
    Index(usize),
    /// The background color: nothing was drawn here.
    NoHit,
    /// A channel was below the lower margin.
    Underflow,
    /// A channel was above the upper margin.
    Overflow,
}

impl Decoded {
    /// `Ok(Some(index))` for a hit, `Ok(None)` for background, the matching
    /// [`MeshViewError`] for a rejected pixel.
    ///
    /// # Errors
    ///
    /// [`MeshViewError::DecodeUnderflow`] or
    /// [`MeshViewError::DecodeOverflow`].
    pub fn into_result(self) -> Result<Option<usize>, MeshViewError> {
        match self {
            Self::Index(index) => Ok(Some(index)),
            Self::NoHit => Ok(None),
            Self::Underflow => Err(MeshViewError::DecodeUnderflow),
            Self::Overflow => Err(MeshViewError::DecodeOverflow),
        }
    }
}

/// Color for entity `index`, or `None` past [`MAX_INDEX`].
#[must_use]
pub fn encode(index: usize) -> Option<Rgb> {
    if index > MAX_INDEX {
        return None;
    }
    let digit = |n: usize| (n % BASE) as u8 + OFFSET;
    Some([digit(index), digit(index / BASE), digit(index / (BASE * BASE))])
}

/// Index encoded in `rgb`. Channels are checked in r, g, b order; the first
/// one outside the valid range decides the error.
#[must_use]
pub fn decode(rgb: Rgb) -> Decoded {
    if rgb == BACKGROUND {
        return Decoded::NoHit;
    }
    for channel in rgb {
        if channel < OFFSET {
            return Decoded::Underflow;
        }
        if channel > HIGHEST {
            return Decoded::Overflow;
        }
    }
    let [r, g, b] = rgb.map(|c| usize::from(c - OFFSET));
    Decoded::Index(r + BASE * g + BASE * BASE * b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_pixels_map_to_errors() {
        assert!(matches!(
            decode([0, 100, 100]).into_result(),
            Err(MeshViewError::DecodeUnderflow)
        ));
        assert!(matches!(
            decode([100, 250, 100]).into_result(),
            Err(MeshViewError::DecodeOverflow)
        ));
        assert_eq!(decode(BACKGROUND).into_result().ok(), Some(None));
        assert_eq!(decode([6, 5, 5]).into_result().ok(), Some(Some(1)));
    }

    #[test]
    fn max_index_matches_base() {
        assert_eq!(MAX_INDEX, 14_706_124);
        assert_eq!(encode(MAX_INDEX), Some([249, 249, 249]));
        assert_eq!(encode(MAX_INDEX + 1), None);
        assert_eq!(encode(0), Some([5, 5, 5]));
    }

    #[test]
    fn round_trip_across_the_range() {
        let edges = [0, 1, BASE - 1, BASE, BASE * BASE - 1, BASE * BASE, MAX_INDEX];
        let strided = (0..=MAX_INDEX).step_by(7919);
        for i in edges.into_iter().chain(strided) {
            let rgb = encode(i).unwrap();
            assert_eq!(decode(rgb), Decoded::Index(i), "index {i}");
        }
    }

    #[test]
    fn margins_never_decode_to_an_index() {
        for bad in (0..OFFSET).chain(HIGHEST + 1..255) {
            let expected = if bad < OFFSET {
                Decoded::Underflow
            } else {
                Decoded::Overflow
            };
            assert_eq!(decode([bad, 100, 100]), expected);
            assert_eq!(decode([100, bad, 100]), expected);
            assert_eq!(decode([100, 100, bad]), expected);
        }
        assert_eq!(decode([0, 0, 0]), Decoded::Underflow);
        assert_eq!(decode([255, 255, 254]), Decoded::Overflow);
    }

    #[test]
    fn first_bad_channel_decides() {
        assert_eq!(decode([2, 250, 100]), Decoded::Underflow);
        assert_eq!(decode([250, 2, 100]), Decoded::Overflow);
    }

    #[test]
    fn background_is_no_hit() {
        assert_eq!(decode(BACKGROUND), Decoded::NoHit);
    }
}
