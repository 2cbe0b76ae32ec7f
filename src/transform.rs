//! Converts resolved style documents into CSS-consumable token values.

use csscolorparser::Color;
use serde::{Deserialize, Serialize};

use crate::figma::{EffectKind, Rgba, StyleDocument, StyleKind};
use crate::theme::{sanitize_file_name, SubArea};

/// Fill styles in these categories describe font colors, not standalone
/// color tokens, and are excluded from the fill path.
pub const FONT_CATEGORIES: &[&str] = &["font", "fonts", "text", "typography"];

/// The value written into a theme file: a color or shadow string, or a
/// text-style record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Text(TextToken),
    Value(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToken {
    pub font_family: String,
    pub font_size: String,
    pub font_weight: u32,
    pub line_height: String,
    pub text_transform: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeToken {
    pub area: SubArea,
    pub value: TokenValue,
}

/// Produces at most one token per style. `None` means the style is skipped:
/// unsupported kind, excluded category, or a document missing the fields
/// the kind requires.
pub fn transform(kind: StyleKind, category: &str, document: &StyleDocument) -> Option<ThemeToken> {
    match kind {
        StyleKind::Fill => fill_token(category, document),
        StyleKind::Text => text_token(document),
        StyleKind::Effect => effect_token(document),
        StyleKind::Other => None,
    }
}

fn fill_token(category: &str, document: &StyleDocument) -> Option<ThemeToken> {
    if FONT_CATEGORIES.contains(&sanitize_file_name(category).as_str()) {
        return None;
    }
    let fill = document.fills.first()?;
    let color = fill.color?;
    let opacity = fill
        .opacity
        .filter(|o| o.is_finite() && (0.0..=1.0).contains(o))
        .unwrap_or(1.0);
    Some(ThemeToken {
        area: SubArea::Colors,
        value: TokenValue::Value(css_color(color, opacity)),
    })
}

fn text_token(document: &StyleDocument) -> Option<ThemeToken> {
    let style = document.style.as_ref()?;
    let font_family = style.font_family.clone()?;
    let font_size = style.font_size?;
    let font_weight = style.font_weight? as u32;
    let line_height = style
        .line_height_percent_font_size
        .filter(|percent| percent.is_finite() && *percent != 0.0)
        .map(|percent| format!("{percent}%"))
        .unwrap_or_else(|| "normal".to_string());
    let text_transform = style
        .text_case
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_else(|| "none".to_string());
    Some(ThemeToken {
        area: SubArea::Fonts,
        value: TokenValue::Text(TextToken {
            font_family,
            font_size: format!("{}rem", font_size / 10.0),
            font_weight,
            line_height,
            text_transform,
        }),
    })
}

fn effect_token(document: &StyleDocument) -> Option<ThemeToken> {
    let effect = document.effects.first()?;
    if effect.kind != EffectKind::DropShadow {
        return None;
    }
    let color = effect.color.unwrap_or_default();
    let mut alpha = (color.a.unwrap_or(1.0) * 100.0).round() / 100.0;
    if alpha == 0.0 {
        alpha = 1.0;
    }
    let offset = effect.offset.unwrap_or_default();
    let radius = effect.radius.unwrap_or(0.0);
    Some(ThemeToken {
        area: SubArea::Colors,
        value: TokenValue::Value(format!(
            "{}px {}px {}px {}",
            offset.x,
            offset.y,
            radius,
            rgba_string(color, alpha)
        )),
    })
}

// Opaque colors render as lowercase hex with no alpha channel; alpha is
// only representable through the rgba form.
fn css_color(color: Rgba, opacity: f64) -> String {
    if opacity < 1.0 {
        return rgba_string(color, opacity);
    }
    let [r, g, b, _] = Color::new(color.r, color.g, color.b, 1.0).to_rgba8();
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn rgba_string(color: Rgba, alpha: f64) -> String {
    let [r, g, b, _] = Color::new(color.r, color.g, color.b, 1.0).to_rgba8();
    format!("rgba({r}, {g}, {b}, {alpha})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figma::{Effect, Paint, TypeStyle, Vector};

    fn fill_document(color: Rgba, opacity: Option<f64>) -> StyleDocument {
        StyleDocument {
            fills: vec![Paint {
                color: Some(color),
                opacity,
            }],
            style: None,
            effects: vec![],
        }
    }

    fn red() -> Rgba {
        Rgba {
            r: 1.0,
            g: 0.0,
            b: 0.0,
            a: None,
        }
    }

    #[test]
    fn opaque_fill_renders_as_lowercase_hex() {
        let token = transform(StyleKind::Fill, "Brand", &fill_document(red(), None)).unwrap();
        assert_eq!(token.area, SubArea::Colors);
        assert_eq!(token.value, TokenValue::Value("#ff0000".to_string()));
    }

    #[test]
    fn translucent_fill_renders_as_rgba_with_raw_opacity() {
        let token = transform(StyleKind::Fill, "Brand", &fill_document(red(), Some(0.5))).unwrap();
        assert_eq!(
            token.value,
            TokenValue::Value("rgba(255, 0, 0, 0.5)".to_string())
        );
    }

    #[test]
    fn invalid_opacity_is_treated_as_opaque() {
        for opacity in [1.5, -0.2, f64::NAN, f64::INFINITY] {
            let token =
                transform(StyleKind::Fill, "Brand", &fill_document(red(), Some(opacity))).unwrap();
            assert_eq!(token.value, TokenValue::Value("#ff0000".to_string()));
        }
    }

    #[test]
    fn hex_never_carries_the_color_alpha_channel() {
        let color = Rgba {
            a: Some(0.5),
            ..red()
        };
        let token = transform(StyleKind::Fill, "Brand", &fill_document(color, None)).unwrap();
        assert_eq!(token.value, TokenValue::Value("#ff0000".to_string()));
    }

    #[test]
    fn fill_without_color_is_skipped() {
        let document = StyleDocument {
            fills: vec![Paint {
                color: None,
                opacity: None,
            }],
            style: None,
            effects: vec![],
        };
        assert!(transform(StyleKind::Fill, "Brand", &document).is_none());
    }

    #[test]
    fn font_categories_are_excluded_from_the_fill_path() {
        let document = fill_document(red(), None);
        assert!(transform(StyleKind::Fill, "Fonts", &document).is_none());
        assert!(transform(StyleKind::Fill, "Typography", &document).is_none());
        assert!(transform(StyleKind::Fill, "Brand", &document).is_some());
    }

    #[test]
    fn text_style_produces_a_font_record() {
        let document = StyleDocument {
            fills: vec![],
            style: Some(TypeStyle {
                font_family: Some("Inter".to_string()),
                font_size: Some(16.0),
                font_weight: Some(700.0),
                line_height_percent_font_size: Some(150.0),
                text_case: Some("UPPER".to_string()),
            }),
            effects: vec![],
        };
        let token = transform(StyleKind::Text, "Heading", &document).unwrap();
        assert_eq!(token.area, SubArea::Fonts);
        assert_eq!(
            token.value,
            TokenValue::Text(TextToken {
                font_family: "Inter".to_string(),
                font_size: "1.6rem".to_string(),
                font_weight: 700,
                line_height: "150%".to_string(),
                text_transform: "upper".to_string(),
            })
        );
    }

    #[test]
    fn text_style_fallbacks_apply() {
        let document = StyleDocument {
            fills: vec![],
            style: Some(TypeStyle {
                font_family: Some("Inter".to_string()),
                font_size: Some(14.0),
                font_weight: Some(400.0),
                line_height_percent_font_size: Some(0.0),
                text_case: None,
            }),
            effects: vec![],
        };
        let token = transform(StyleKind::Text, "Body", &document).unwrap();
        let TokenValue::Text(text) = token.value else {
            panic!("expected a text record");
        };
        assert_eq!(text.line_height, "normal");
        assert_eq!(text.text_transform, "none");
    }

    #[test]
    fn text_style_with_fills_only_emits_font_token() {
        // A text style whose document also declares fills must not double
        // as a color token.
        let document = StyleDocument {
            fills: vec![Paint {
                color: Some(red()),
                opacity: None,
            }],
            style: Some(TypeStyle {
                font_family: Some("Inter".to_string()),
                font_size: Some(12.0),
                font_weight: Some(500.0),
                line_height_percent_font_size: None,
                text_case: None,
            }),
            effects: vec![],
        };
        let token = transform(StyleKind::Text, "Label", &document).unwrap();
        assert_eq!(token.area, SubArea::Fonts);
        assert!(matches!(token.value, TokenValue::Text(_)));
    }

    #[test]
    fn drop_shadow_composes_offsets_radius_and_color() {
        let document = StyleDocument {
            fills: vec![],
            style: None,
            effects: vec![Effect {
                kind: EffectKind::DropShadow,
                color: Some(Rgba {
                    r: 0.0,
                    g: 0.0,
                    b: 0.0,
                    a: Some(0.247),
                }),
                offset: Some(Vector { x: 0.0, y: 4.0 }),
                radius: Some(8.0),
            }],
        };
        let token = transform(StyleKind::Effect, "Shadows", &document).unwrap();
        assert_eq!(token.area, SubArea::Colors);
        assert_eq!(
            token.value,
            TokenValue::Value("0px 4px 8px rgba(0, 0, 0, 0.25)".to_string())
        );
    }

    #[test]
    fn shadow_components_default_to_zero_and_alpha_to_one() {
        let document = StyleDocument {
            fills: vec![],
            style: None,
            effects: vec![Effect {
                kind: EffectKind::DropShadow,
                color: Some(Rgba {
                    r: 0.0,
                    g: 0.0,
                    b: 0.0,
                    a: Some(0.0),
                }),
                offset: None,
                radius: None,
            }],
        };
        let token = transform(StyleKind::Effect, "Shadows", &document).unwrap();
        assert_eq!(
            token.value,
            TokenValue::Value("0px 0px 0px rgba(0, 0, 0, 1)".to_string())
        );
    }

    #[test]
    fn non_shadow_effects_are_ignored() {
        let document = StyleDocument {
            fills: vec![],
            style: None,
            effects: vec![Effect {
                kind: EffectKind::Other,
                color: None,
                offset: None,
                radius: None,
            }],
        };
        assert!(transform(StyleKind::Effect, "Blurs", &document).is_none());
    }

    #[test]
    fn unsupported_style_kinds_are_ignored() {
        let document = fill_document(red(), None);
        assert!(transform(StyleKind::Other, "Grids", &document).is_none());
    }
}
