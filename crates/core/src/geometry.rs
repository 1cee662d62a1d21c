//! Package geometry.
//!
//! A [`Package`] is a rectangular carton described by three integer side
//! lengths and an optional weight. Packages are kept in canonical orientation
//! (largest side first), so two cartons that only differ by a rotation are the
//! same package for packing purposes.

use crate::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Three side lengths along the height, width and length axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dimensions {
    /// Extent along the height axis.
    pub height: u32,
    /// Extent along the width axis.
    pub width: u32,
    /// Extent along the length axis.
    pub length: u32,
}

impl Dimensions {
    /// Creates dimensions exactly as given, without reordering.
    pub const fn new(height: u32, width: u32, length: u32) -> Self {
        Self {
            height,
            width,
            length,
        }
    }

    /// Returns the sides sorted in descending order.
    pub fn canonical(self) -> Self {
        let mut sides = [self.height, self.width, self.length];
        sides.sort_unstable_by(|a, b| b.cmp(a));
        Self::new(sides[0], sides[1], sides[2])
    }

    /// Returns true if height >= width >= length.
    pub fn is_canonical(&self) -> bool {
        self.height >= self.width && self.width >= self.length
    }

    /// Returns the volume.
    pub fn volume(&self) -> u64 {
        u64::from(self.height) * u64::from(self.width) * u64::from(self.length)
    }

    /// Returns true if every side is at most the corresponding side of `other`.
    pub fn fits_within(&self, other: &Dimensions) -> bool {
        self.height <= other.height && self.width <= other.width && self.length <= other.length
    }

    /// Returns the distinct axis permutations of these dimensions.
    ///
    /// The order is the lexicographic permutation order of
    /// `(height, width, length)`, keeping the first occurrence of duplicates.
    pub fn permutations(&self) -> Vec<Dimensions> {
        let (h, w, l) = (self.height, self.width, self.length);
        let candidates = [
            Dimensions::new(h, w, l),
            Dimensions::new(h, l, w),
            Dimensions::new(w, h, l),
            Dimensions::new(w, l, h),
            Dimensions::new(l, h, w),
            Dimensions::new(l, w, h),
        ];

        let mut distinct: Vec<Dimensions> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !distinct.contains(&candidate) {
                distinct.push(candidate);
            }
        }
        distinct
    }

    /// Side pairs `(height, width)`, `(height, length)`, `(width, length)`.
    fn sides(&self) -> [(u32, u32); 3] {
        [
            (self.height, self.width),
            (self.height, self.length),
            (self.width, self.length),
        ]
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.height, self.width, self.length)
    }
}

/// A rectangular shipping carton.
///
/// Equality and hashing only look at the canonical dimensions: weight and
/// the orientation a packer chose are ignored. Deserialization goes through
/// [`Package::new`], so it canonicalizes and rejects zero sides.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "PackageRepr")
)]
pub struct Package {
    /// Stored dimensions. Canonical unless produced by [`Package::rotations`].
    dimensions: Dimensions,

    /// Weight in grams (0 = unknown).
    weight: u32,
}

impl Package {
    /// The standard shipping carton used when no container is given.
    pub const STANDARD_CONTAINER: Package = Package {
        dimensions: Dimensions::new(600, 400, 400),
        weight: 0,
    };

    /// Creates a package from three side lengths in any order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if a side is zero.
    pub fn new(a: u32, b: u32, c: u32) -> Result<Self> {
        let dimensions = Dimensions::new(a, b, c);
        if a == 0 || b == 0 || c == 0 {
            return Err(Error::Format(format!(
                "all dimensions must be positive, got {dimensions}"
            )));
        }
        Ok(Self {
            dimensions: dimensions.canonical(),
            weight: 0,
        })
    }

    /// Parses a package from its textual form, e.g. `"600x400x400"`.
    ///
    /// A weight may follow after whitespace, optionally suffixed with `g`
    /// (`"800x310x250 7400g"`).
    pub fn parse(input: &str) -> Result<Self> {
        input.parse()
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Returns the stored dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Returns the side along the height axis.
    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    /// Returns the side along the width axis.
    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    /// Returns the side along the length axis.
    pub fn length(&self) -> u32 {
        self.dimensions.length
    }

    /// Returns the weight.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Returns the volume.
    pub fn volume(&self) -> u64 {
        self.dimensions.volume()
    }

    /// Returns the girth: largest side plus twice the sum of the other two.
    ///
    /// Carriers use this to price parcels.
    pub fn girth(&self) -> u64 {
        let c = self.dimensions.canonical();
        u64::from(c.height) + 2 * (u64::from(c.width) + u64::from(c.length))
    }

    /// Returns true if this package fits into `container` axis by axis.
    ///
    /// Both packages are compared as stored. For canonical packages this is
    /// largest side against largest side.
    pub fn fits_within(&self, container: &Package) -> bool {
        self.dimensions.fits_within(&container.dimensions)
    }

    /// Returns true if both packages have a side (a pair of dimensions) in common.
    pub fn shares_two_sides(&self, other: &Package) -> bool {
        !self.common_sides(other).is_empty()
    }

    /// Stacks `other` onto this package along the side they have in common.
    ///
    /// The shared pair of dimensions is kept and the remaining dimensions are
    /// summed; weights are added. When several sides match, the largest pair
    /// (compared lexicographically) is used, so the merge is commutative.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleGeometry`] if the packages have no common side.
    pub fn merge(&self, other: &Package) -> Result<Package> {
        let common = self.common_sides(other);
        let Some(&(a, b)) = common.iter().max() else {
            return Err(Error::IncompatibleGeometry {
                left: self.to_string(),
                right: other.to_string(),
            });
        };

        let mine = remaining_side(self.dimensions.canonical(), a, b);
        let theirs = remaining_side(other.dimensions.canonical(), a, b);
        let stacked = mine.checked_add(theirs).ok_or_else(|| {
            Error::Format(format!("merging {self} and {other} overflows"))
        })?;

        Ok(Package::new(a, b, stacked)?.with_weight(self.weight.saturating_add(other.weight)))
    }

    /// Returns `count` copies of this package stacked along the length axis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for a zero count or if the stack overflows.
    pub fn stacked(&self, count: u32) -> Result<Package> {
        let c = self.dimensions.canonical();
        let length = c
            .length
            .checked_mul(count)
            .filter(|&l| l > 0)
            .ok_or_else(|| Error::Format(format!("cannot stack {self} {count} times")))?;
        let weight = self.weight.saturating_mul(count);
        Ok(Package::new(c.height, c.width, length)?.with_weight(weight))
    }

    /// Returns the canonical (largest side first) variant of this package.
    pub fn canonical(&self) -> Package {
        Package {
            dimensions: self.dimensions.canonical(),
            weight: self.weight,
        }
    }

    /// Returns every distinct axis-aligned orientation of this package.
    ///
    /// The returned packages keep the chosen orientation; they compare equal
    /// to the unrotated package.
    pub fn rotations(&self) -> Vec<Package> {
        self.dimensions
            .canonical()
            .permutations()
            .into_iter()
            .map(|dimensions| Package {
                dimensions,
                weight: self.weight,
            })
            .collect()
    }

    /// Compares two packages by volume.
    pub fn cmp_volume(&self, other: &Package) -> Ordering {
        self.volume().cmp(&other.volume())
    }

    fn common_sides(&self, other: &Package) -> Vec<(u32, u32)> {
        let mine = self.dimensions.canonical().sides();
        let theirs = other.dimensions.canonical().sides();
        mine.into_iter().filter(|side| theirs.contains(side)).collect()
    }
}

/// Removes one occurrence of `a` and of `b` from `dims` and returns the side left over.
fn remaining_side(dims: Dimensions, a: u32, b: u32) -> u32 {
    let mut sides = vec![dims.height, dims.width, dims.length];
    for side in [a, b] {
        if let Some(pos) = sides.iter().position(|&s| s == side) {
            sides.remove(pos);
        }
    }
    sides.first().copied().unwrap_or(0)
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions.canonical() == other.dimensions.canonical()
    }
}

impl Eq for Package {}

impl Hash for Package {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimensions.canonical().hash(state);
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weight > 0 {
            write!(f, "{} {}g", self.dimensions, self.weight)
        } else {
            write!(f, "{}", self.dimensions)
        }
    }
}

impl FromStr for Package {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = s.split_whitespace();
        let size = tokens
            .next()
            .ok_or_else(|| Error::Format("empty package description".into()))?;
        let weight = tokens.next();
        if tokens.next().is_some() {
            return Err(Error::Format(format!("unexpected trailing input in '{s}'")));
        }

        let sides = size
            .split('x')
            .map(|part| {
                part.trim()
                    .parse::<u32>()
                    .map_err(|_| Error::Format(format!("'{part}' in '{size}' is not a number")))
            })
            .collect::<Result<Vec<u32>>>()?;

        let [a, b, c] = sides[..] else {
            return Err(Error::Format(format!(
                "expected three dimensions separated by 'x', got {} in '{size}'",
                sides.len()
            )));
        };

        let package = Package::new(a, b, c)?;
        match weight {
            Some(w) => {
                let grams = w
                    .trim_end_matches('g')
                    .parse::<u32>()
                    .map_err(|_| Error::Format(format!("invalid weight '{w}'")))?;
                Ok(package.with_weight(grams))
            }
            None => Ok(package),
        }
    }
}

impl TryFrom<(u32, u32, u32)> for Package {
    type Error = Error;

    fn try_from((a, b, c): (u32, u32, u32)) -> Result<Self> {
        Package::new(a, b, c)
    }
}

impl TryFrom<[u32; 3]> for Package {
    type Error = Error;

    fn try_from([a, b, c]: [u32; 3]) -> Result<Self> {
        Package::new(a, b, c)
    }
}

/// Serialized form of a [`Package`], checked on the way in.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct PackageRepr {
    dimensions: Dimensions,
    #[serde(default)]
    weight: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<PackageRepr> for Package {
    type Error = Error;

    fn try_from(repr: PackageRepr) -> Result<Self> {
        let Dimensions {
            height,
            width,
            length,
        } = repr.dimensions;
        Ok(Package::new(height, width, length)?.with_weight(repr.weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(s: &str) -> Package {
        s.parse().unwrap()
    }

    #[test]
    fn test_canonical_order() {
        let p = Package::new(300, 400, 500).unwrap();
        assert_eq!(p.dimensions(), Dimensions::new(500, 400, 300));
        assert_eq!(pkg("300x400x500").to_string(), "500x400x300");
    }

    #[test]
    fn test_rotation_insensitive_equality() {
        assert_eq!(pkg("100x110x120"), pkg("120x110x100"));
        assert_eq!(Package::new(200, 100, 200).unwrap(), pkg("200x200x100"));
        assert_ne!(pkg("200x200x100"), pkg("100x100x200"));
    }

    #[test]
    fn test_volume() {
        assert_eq!(pkg("100x200x200").volume(), 4_000_000);
        assert_eq!(pkg("20x20x20").volume(), 8000);
    }

    #[test]
    fn test_girth() {
        assert_eq!(pkg("100x200x200").girth(), 800);
        assert_eq!(pkg("100x200x300").girth(), 900);
        assert_eq!(pkg("200x200x200").girth(), 1000);
        assert_eq!(pkg("1600x250x480").girth(), 3060);
        assert_eq!(pkg("100x110x120").girth(), 540);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Package::parse("100x200"), Err(Error::Format(_))));
        assert!(matches!(Package::parse("1x2x3x4"), Err(Error::Format(_))));
        assert!(matches!(Package::parse("100xabcx200"), Err(Error::Format(_))));
        assert!(matches!(Package::parse("0x200x200"), Err(Error::Format(_))));
        assert!(matches!(Package::parse("-1x200x200"), Err(Error::Format(_))));
        assert!(matches!(Package::parse(""), Err(Error::Format(_))));
    }

    #[test]
    fn test_parse_with_weight() {
        let p = pkg("200x100x200 44");
        assert_eq!(p.weight(), 44);
        assert_eq!(p.to_string(), "200x200x100 44g");
        assert_eq!(pkg("750x240x220 7400g").weight(), 7400);
        assert!(Package::parse("750x240x220 heavy").is_err());
    }

    #[test]
    fn test_tuple_input() {
        let a = Package::try_from((100, 100, 200)).unwrap();
        let b = Package::try_from([200, 100, 100]).unwrap();
        assert_eq!(a, b);
        assert!(Package::try_from((0, 1, 1)).is_err());
    }

    #[test]
    fn test_fits_within() {
        assert!(pkg("1600x250x480").fits_within(&pkg("1600x250x480")));
        assert!(!pkg("1600x252x480").fits_within(&pkg("1600x250x480")));
        assert!(!pkg("485x280x590").fits_within(&pkg("600x400x400")));
    }

    #[test]
    fn test_shares_two_sides() {
        assert!(pkg("800x310x250").shares_two_sides(&pkg("800x310x250")));
        assert!(pkg("1600x250x480").shares_two_sides(&pkg("1600x470x480")));
        assert!(!pkg("800x310x250").shares_two_sides(&pkg("450x290x250")));
    }

    #[test]
    fn test_merge() {
        let merged = pkg("1600x250x480").merge(&pkg("1600x470x480")).unwrap();
        assert_eq!(merged.dimensions(), Dimensions::new(1600, 720, 480));

        let merged = pkg("1600x250x480").merge(&pkg("1600x480x480")).unwrap();
        assert_eq!(merged.dimensions(), Dimensions::new(1600, 730, 480));

        let merged = pkg("1600x250x480").merge(&pkg("1600x490x480")).unwrap();
        assert_eq!(merged.dimensions(), Dimensions::new(1600, 740, 480));
    }

    #[test]
    fn test_merge_picks_largest_side() {
        // (800, 310) and (800, 250) both match; the larger pair wins.
        let a = pkg("800x310x250");
        let merged = a.merge(&a).unwrap();
        assert_eq!(merged.dimensions(), Dimensions::new(800, 500, 310));
        assert_eq!(merged.volume(), 2 * a.volume());
    }

    #[test]
    fn test_merge_sums_weight() {
        let a = pkg("800x310x250").with_weight(7000);
        let b = pkg("800x310x250").with_weight(5000);
        assert_eq!(a.merge(&b).unwrap().weight(), 12000);
    }

    #[test]
    fn test_merge_incompatible() {
        let err = pkg("800x310x250").merge(&pkg("450x290x250")).unwrap_err();
        assert!(matches!(err, Error::IncompatibleGeometry { .. }));
    }

    #[test]
    fn test_stacked() {
        let p = Package::new(400, 300, 600).unwrap();
        assert_eq!(p.stacked(2).unwrap(), pkg("600x600x400"));
        assert_eq!(pkg("100x200x200").stacked(2).unwrap(), pkg("200x200x200"));
        assert_eq!(pkg("750x240x220 7400").stacked(3).unwrap().weight(), 22200);
        assert!(p.stacked(0).is_err());
    }

    #[test]
    fn test_permutations_distinct() {
        assert_eq!(Dimensions::new(3, 2, 1).permutations().len(), 6);
        assert_eq!(Dimensions::new(2, 2, 1).permutations().len(), 3);
        assert_eq!(Dimensions::new(2, 2, 2).permutations().len(), 1);

        let perms = Dimensions::new(3, 2, 1).permutations();
        assert_eq!(perms[0], Dimensions::new(3, 2, 1));
        assert_eq!(perms[1], Dimensions::new(3, 1, 2));
        assert_eq!(perms[5], Dimensions::new(1, 2, 3));
    }

    #[test]
    fn test_rotations_keep_identity() {
        let p = pkg("390x380x170");
        let rotations = p.rotations();
        assert_eq!(rotations.len(), 6);
        assert!(rotations.iter().all(|r| *r == p));
        assert!(rotations.iter().any(|r| !r.dimensions().is_canonical()));
        assert!(rotations.iter().all(|r| r.canonical().dimensions().is_canonical()));
    }

    #[test]
    fn test_volume_ordering() {
        let mut data = vec![pkg("1600x490x480"), pkg("1600x470x480"), pkg("1600x480x480")];
        data.sort_by(Package::cmp_volume);
        assert_eq!(
            data,
            vec![pkg("1600x470x480"), pkg("1600x480x480"), pkg("1600x490x480")]
        );
    }

    #[test]
    fn test_hash_matches_equality() {
        use std::collections::HashSet;
        let set: HashSet<Package> = ["100x200x300", "300x200x100", "200x300x100"]
            .iter()
            .map(|s| pkg(s))
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_canonicalizes() {
        let json = r#"{"dimensions":{"height":200,"width":600,"length":400},"weight":900}"#;
        let package: Package = serde_json::from_str(json).unwrap();
        assert_eq!(package.dimensions(), Dimensions::new(600, 400, 200));
        assert_eq!(package.weight(), 900);

        let text = serde_json::to_string(&package).unwrap();
        let again: Package = serde_json::from_str(&text).unwrap();
        assert_eq!(again.dimensions(), package.dimensions());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_zero_side() {
        let json = r#"{"dimensions":{"height":0,"width":600,"length":400}}"#;
        let err = serde_json::from_str::<Package>(json).unwrap_err();
        assert!(err.to_string().contains("positive"), "{err}");
    }
}
