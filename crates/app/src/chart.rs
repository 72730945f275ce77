use gymlog_domain as domain;
use plotters::{
    prelude::{Circle, IntoDrawingArea, PathElement, SVGBackend, Text},
    style::{Color, IntoFont, Palette, Palette99, RGBColor, TextStyle, WHITE},
};

pub const COLOR_REPS: usize = 4;
pub const COLOR_WEIGHT: usize = 8;

pub const OPACITY_LINE: f64 = 0.9;
pub const OPACITY_GUIDE: f64 = 0.3;

pub const WIDTH_LINE: u32 = 2;

pub const SIZE_POINT: u32 = 3;
pub const SIZE_SELECTED_POINT: u32 = 5;

pub const FONT: (&str, u32) = ("Roboto", 11);

/// Render a trend projection as SVG.
///
/// The reps line is drawn in the upper half and the weight line in the lower
/// half of the area, both at the pixel positions computed by the projection.
/// The selected point is marked by a vertical guide and enlarged circles on
/// both lines. Each band is labeled with the value range of its scale.
pub fn plot_trend(
    projection: &domain::TrendProjection,
    area: &domain::PlotArea,
    theme: domain::Theme,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut result = String::new();

    {
        let root = SVGBackend::with_string(&mut result, (pixels(area.width), pixels(area.height)))
            .into_drawing_area();
        let (color, background_color) = colors(theme);
        let text_style = TextStyle::from(FONT.into_font()).color(&color);

        root.fill(&background_color)?;

        let middle = px(area.height / 2.);
        root.draw(&PathElement::new(
            vec![(0, middle), (px(area.width), middle)],
            color.mix(0.05),
        ))?;

        let selected = projection.selected_point();
        root.draw(&PathElement::new(
            vec![(px(selected.x), 0), (px(selected.x), px(area.height))],
            color.mix(OPACITY_GUIDE),
        ))?;

        for (line_color, coords) in [
            (
                COLOR_REPS,
                projection
                    .points
                    .iter()
                    .map(|p| (px(p.x), px(p.reps_y)))
                    .collect::<Vec<_>>(),
            ),
            (
                COLOR_WEIGHT,
                projection
                    .points
                    .iter()
                    .map(|p| (px(p.x), px(p.weight_y)))
                    .collect::<Vec<_>>(),
            ),
        ] {
            let style = Palette99::pick(line_color).mix(OPACITY_LINE);
            if coords.len() > 1 {
                root.draw(&PathElement::new(
                    coords.clone(),
                    style.stroke_width(WIDTH_LINE),
                ))?;
            }
            for coord in coords {
                root.draw(&Circle::new(coord, SIZE_POINT, style.filled()))?;
            }
        }

        for y in [selected.reps_y, selected.weight_y] {
            root.draw(&Circle::new(
                (px(selected.x), px(y)),
                SIZE_SELECTED_POINT,
                color.stroke_width(WIDTH_LINE),
            ))?;
        }

        let label_x = px(area.padding / 4.);
        for (label, scale) in [
            ("reps", &projection.rep_scale),
            ("weight", &projection.weight_scale),
        ] {
            root.draw(&Text::new(
                format!("{label} {}–{}", scale.min, scale.max),
                (label_x, px(scale.end - area.padding / 2.)),
                text_style.clone(),
            ))?;
        }

        root.present()?;
    }

    Ok(result)
}

#[allow(clippy::cast_possible_truncation)]
fn px(value: f64) -> i32 {
    value.round() as i32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixels(value: f64) -> u32 {
    value.max(0.).round() as u32
}

fn colors(theme: domain::Theme) -> (RGBColor, RGBColor) {
    let dark = RGBColor(20, 22, 26);
    match theme {
        domain::Theme::System | domain::Theme::Light => (dark, WHITE),
        domain::Theme::Dark => (WHITE, dark),
    }
}
