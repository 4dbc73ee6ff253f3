//! Validation of abbreviation style parameters.
//!
//! Only four CSS properties may be overridden, and each accepts a narrow
//! value grammar so that user input can never break out of the generated
//! inline style:
//!
//! | Property | Accepted values |
//! |----------|-----------------|
//! | `border-color`, `background-color` | `name`, `#rgb`, `#rrggbb`, `rgb(r,g,b)`, `rgb(r%,g%,b%)` |
//! | `text-align` | `center`, `justify`, `left`, `right` |
//! | `padding` | 1-4 of `auto`, `<n>px`, `<n>%`, `<n>em` |

use winnow::{
    Parser as _,
    ascii::digit1,
    combinator::{alt, eof, repeat, terminated},
    error::{ContextError, ModalResult},
    token::take_while,
};

use tessera_core::style::StyleKey;

type IResult<O> = ModalResult<O, ContextError>;

/// Parse zero or more spaces (only U+0020)
fn spaces(input: &mut &str) -> IResult<()> {
    take_while(0.., ' ').void().parse_next(input)
}

/// Parse a lowercase color name such as `green`
fn color_name(input: &mut &str) -> IResult<()> {
    take_while(1.., |c: char| c.is_ascii_lowercase())
        .void()
        .parse_next(input)
}

/// Parse `#rgb` or `#rrggbb`
fn hex_color(input: &mut &str) -> IResult<()> {
    let hex = |c: char| c.is_ascii_hexdigit();
    (
        '#',
        alt((
            terminated(take_while(6, hex), eof),
            terminated(take_while(3, hex), eof),
        )),
    )
        .void()
        .parse_next(input)
}

/// Parse one `rgb()` component, optionally requiring a trailing `%`
fn rgb_component<'a>(percent: bool) -> impl FnMut(&mut &'a str) -> IResult<()> {
    move |input: &mut &'a str| {
        spaces(input)?;
        take_while(1..=3, |c: char| c.is_ascii_digit()).parse_next(input)?;
        if percent {
            '%'.parse_next(input)?;
        }
        spaces(input)
    }
}

/// Parse `rgb(r,g,b)` where all components agree on the `%` suffix
fn rgb_color(input: &mut &str) -> IResult<()> {
    let rgb = |percent: bool| {
        (
            "rgb(",
            rgb_component(percent),
            ',',
            rgb_component(percent),
            ',',
            rgb_component(percent),
            ')',
        )
            .void()
    };
    alt((rgb(false), rgb(true))).parse_next(input)
}

/// Parse one padding component followed by optional spaces
fn padding_component(input: &mut &str) -> IResult<()> {
    terminated(
        alt(("auto".void(), (digit1, alt(("px", "%", "em"))).void())),
        spaces,
    )
    .parse_next(input)
}

/// Returns `true` if `value` is an accepted CSS color.
pub fn is_valid_color(value: &str) -> bool {
    alt((
        terminated(color_name, eof),
        hex_color,
        terminated(rgb_color, eof),
    ))
    .parse(value)
    .is_ok()
}

/// Returns `true` if `value` is an accepted `text-align` value.
pub fn is_valid_text_align(value: &str) -> bool {
    matches!(value, "center" | "justify" | "left" | "right")
}

/// Returns `true` if `value` is an accepted `padding` value.
pub fn is_valid_padding(value: &str) -> bool {
    repeat::<_, _, (), _, _>(1..=4, padding_component)
        .parse(value)
        .is_ok()
}

/// Returns `true` if `value` is acceptable for the property `key`.
pub fn is_valid_value(key: StyleKey, value: &str) -> bool {
    match key {
        StyleKey::BorderColor | StyleKey::BackgroundColor => is_valid_color(value),
        StyleKey::TextAlign => is_valid_text_align(value),
        StyleKey::Padding => is_valid_padding(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors() {
        for valid in [
            "green",
            "#e73",
            "#EF703F",
            "rgb(11,22,33)",
            "rgb( 1 , 2 , 255 )",
            "rgb(10%,20%,30%)",
        ] {
            assert!(is_valid_color(valid), "{valid} should be valid");
        }
        for invalid in [
            "",
            "Green",
            "#e7",
            "#e7310",
            "#ggg",
            "rgb(1,2)",
            "rgb(1%,2,3)",
            "rgb(1000,2,3)",
            "red;x",
            "url(a)",
        ] {
            assert!(!is_valid_color(invalid), "{invalid} should be invalid");
        }
    }

    #[test]
    fn test_text_align() {
        assert!(is_valid_text_align("center"));
        assert!(is_valid_text_align("justify"));
        assert!(!is_valid_text_align("middle"));
        assert!(!is_valid_text_align("Center"));
    }

    #[test]
    fn test_padding() {
        for valid in ["auto", "10px", "1px 2px", "1em 2% auto 0px", "1px2px"] {
            assert!(is_valid_padding(valid), "{valid} should be valid");
        }
        for invalid in [
            "",
            "10xyz",
            "10",
            "px",
            "1px 2px 3px 4px 5px",
            " 1px",
            "-1px",
        ] {
            assert!(!is_valid_padding(invalid), "{invalid} should be invalid");
        }
    }

    #[test]
    fn test_dispatch_by_key() {
        assert!(is_valid_value(StyleKey::BorderColor, "red"));
        assert!(!is_valid_value(StyleKey::TextAlign, "red"));
        assert!(is_valid_value(StyleKey::Padding, "4px"));
    }
}
