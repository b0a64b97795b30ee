//! Library of parser functions for `.rrng` records
//!
//! Record grammars are deliberately forgiving about trailing content,
//! since vendor tools append comments and extra fields after the
//! colour code.

// crate modules
use crate::range::{Ion, RangeEntry};

// nom parser combinators
use nom::bytes::complete::{tag, take_until1, take_while_m_n};
use nom::character::complete::{alphanumeric1, char, digit1, space1};
use nom::error::{Error, ErrorKind};
use nom::number::complete::double;
use nom::sequence::{preceded, tuple};
use nom::{Err, IResult};

// ! Boolean checks

/// Check for an `Ion<N>=` record, e.g. `Ion2=Fe`
///
/// Section headers such as `[Ions]` and count lines such as `Number=2`
/// do not qualify.
pub fn is_ion_record(i: &str) -> bool {
    tuple((tag::<_, _, Error<&str>>("Ion"), digit1, char('=')))(i).is_ok()
}

/// Check for a `Range<N>=` record, e.g. `Range1=53.9 54.1 ...`
pub fn is_range_record(i: &str) -> bool {
    tuple((tag::<_, _, Error<&str>>("Range"), digit1, char('=')))(i).is_ok()
}

// ! Record parsers

/// Parse an `Ion<N>=<name>` record into an [Ion]
pub fn ion_record(i: &str) -> IResult<&str, Ion> {
    let (i, number) = preceded(tag("Ion"), nom::character::complete::u32)(i)?;
    let (i, _) = char('=')(i)?;
    let (i, name) = alphanumeric1(i)?;

    Ok((
        i,
        Ion {
            number,
            name: name.to_string(),
        },
    ))
}

/// Parse a full `Range<N>=` record into a [RangeEntry]
///
/// The expected shape is:
///
/// ```text
/// Range<N>=<lower> <upper> Vol:<volume> <composition> Color:<6 hex digits>
/// ```
///
/// where `<composition>` is one or more `element:count` tokens, e.g.
/// `Fe:1` or `Fe:1 O:1` for a molecular ion.
pub fn range_record(i: &str) -> IResult<&str, RangeEntry> {
    let (i, number) = preceded(tag("Range"), nom::character::complete::u32)(i)?;
    let (i, _) = char('=')(i)?;
    let (i, lower) = double(i)?;
    let (i, _) = space1(i)?;
    let (i, upper) = double(i)?;
    let (i, _) = space1(i)?;
    let (i, volume) = preceded(tag("Vol:"), double)(i)?;
    let (i, _) = space1(i)?;
    let (i, comp) = composition(i)?;
    let (i, colour) = preceded(tag("Color:"), hex_colour)(i)?;

    Ok((
        i,
        RangeEntry {
            number,
            lower,
            upper,
            volume,
            comp,
            colour: colour.to_string(),
        },
    ))
}

/// Composition tokens between the volume and the colour tag
///
/// Normalised to single spaces so that `Fe:1  O:1` and `Fe:1 O:1` are
/// the same species label downstream.
fn composition(i: &str) -> IResult<&str, String> {
    let (i, raw) = take_until1("Color:")(i)?;
    let comp = raw.split_whitespace().collect::<Vec<&str>>().join(" ");

    if comp.is_empty() {
        return Err(Err::Error(Error::new(i, ErrorKind::Fail)));
    }

    Ok((i, comp))
}

/// Exactly six hex digits of display colour
fn hex_colour(i: &str) -> IResult<&str, &str> {
    take_while_m_n(6, 6, |c: char| c.is_ascii_hexdigit())(i)
}

#[cfg(test)]
mod record_tests {
    use super::*;

    #[test]
    fn ion_record_hints() {
        assert!(is_ion_record("Ion1=Fe"));
        assert!(is_ion_record("Ion12=O"));
        // headers and counts are not records
        assert!(!is_ion_record("[Ions]"));
        assert!(!is_ion_record("Number=2"));
        assert!(!is_ion_record("Range1=1.0 2.0"));
    }

    #[test]
    fn range_record_hints() {
        assert!(is_range_record("Range1=53.912 54.136 Vol:0.01201 Fe:1 Color:FF0000"));
        assert!(!is_range_record("[Ranges]"));
        assert!(!is_range_record("Ranges=3"));
    }

    #[test]
    fn parse_simple_ion() {
        let (_, ion) = ion_record("Ion2=Fe").unwrap();
        assert_eq!(ion.number, 2);
        assert_eq!(ion.name, "Fe");
    }

    #[test]
    fn parse_single_species_range() {
        let (_, range) =
            range_record("Range1=53.912 54.136 Vol:0.01201 Fe:1 Color:FF0000").unwrap();
        assert_eq!(range.number, 1);
        assert_eq!(range.lower, 53.912);
        assert_eq!(range.upper, 54.136);
        assert_eq!(range.volume, 0.01201);
        assert_eq!(range.comp, "Fe:1");
        assert_eq!(range.colour, "FF0000");
    }

    #[test]
    fn parse_molecular_ion_range() {
        let (_, range) =
            range_record("Range4=43.873 44.194 Vol:0.04543 Fe:1 O:1 Color:00FFFF").unwrap();
        assert_eq!(range.comp, "Fe:1 O:1");
        assert_eq!(range.colour, "00FFFF");
    }

    #[test]
    fn composition_whitespace_is_normalised() {
        let (_, range) =
            range_record("Range2=31.9 32.15 Vol:0.02 O:1   O:1 Color:00B7FF").unwrap();
        assert_eq!(range.comp, "O:1 O:1");
    }

    #[test]
    fn malformed_ranges_fail() {
        // missing colour field
        assert!(range_record("Range1=53.912 54.136 Vol:0.01201 Fe:1").is_err());
        // unparsable numeric field
        assert!(range_record("Range1=low 54.136 Vol:0.01201 Fe:1 Color:FF0000").is_err());
        // missing composition
        assert!(range_record("Range1=53.912 54.136 Vol:0.01201 Color:FF0000").is_err());
    }
}
