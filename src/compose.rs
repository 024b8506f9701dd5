//! Draws a caregiver's card onto a copy of the template.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::layout::{Field, Layout, SUBTITLE};
use crate::sheet::Record;
use crate::text::{wrap, Anchor, FontSet};

/// The introductory paragraph under the heading.
#[must_use]
pub fn description(name: &str, record: &Record) -> String {
    format!(
        "Compassionate, dedicated, and experienced, {name} brings {} years of caregiving \
         expertise, including past work experience with families/elderly care. Fluent in {}, \
         she combines professional skill with genuine empathy, and is ready to serve families \
         in {}.",
        record.experience, record.languages, record.location
    )
}

/// Compose a full card: heading, description, field values and photo.
#[must_use]
pub fn compose(
    template: &RgbaImage,
    layout: &Layout,
    fonts: &FontSet,
    name: &str,
    record: &Record,
    cutout: &RgbaImage,
) -> RgbaImage {
    let mut canvas = template.clone();
    draw_heading(&mut canvas, layout, fonts, name);
    draw_description(&mut canvas, layout, fonts, name, record);
    draw_fields(&mut canvas, layout, fonts, record);
    paste_photo(&mut canvas, layout, cutout);
    canvas
}

#[allow(clippy::cast_precision_loss)]
fn centre_x(canvas: &RgbaImage) -> f32 {
    (canvas.width() / 2) as f32
}

/// Title and subtitle, centred on their lines.
#[allow(clippy::cast_precision_loss)]
pub fn draw_heading(canvas: &mut RgbaImage, layout: &Layout, fonts: &FontSet, name: &str) {
    let x = centre_x(canvas);
    let title = format!("MEET {}!", name.to_uppercase());
    fonts.draw(canvas, &layout.title, Anchor::Centre, (x, layout.title_y as f32), &title);
    fonts.draw(canvas, &layout.subtitle, Anchor::Centre, (x, layout.subtitle_y as f32), SUBTITLE);
}

/// The wrapped description paragraph.
#[allow(clippy::cast_precision_loss)]
pub fn draw_description(
    canvas: &mut RgbaImage,
    layout: &Layout,
    fonts: &FontSet,
    name: &str,
    record: &Record,
) {
    let lines = wrap(&description(name, record), layout.description_columns);
    let centre = (centre_x(canvas), layout.description_y as f32);
    fonts.draw_paragraph(canvas, &layout.description, centre, &lines, layout.line_spacing as f32);
}

/// Every field value at its own slot. Long values are not clipped.
#[allow(clippy::cast_precision_loss)]
pub fn draw_fields(canvas: &mut RgbaImage, layout: &Layout, fonts: &FontSet, record: &Record) {
    for field in Field::ALL {
        let slot = layout.value_slots.get(field);
        let value = field.value(record);
        fonts.draw(canvas, &layout.value, Anchor::TopLeft, (slot.x as f32, slot.y as f32), &value);
    }
}

/// Resize the cutout and blend it in through its alpha channel, clipped to
/// the canvas.
pub fn paste_photo(canvas: &mut RgbaImage, layout: &Layout, cutout: &RgbaImage) {
    let (w, h) = layout.photo_size;
    let resized = imageops::resize(cutout, w, h, FilterType::Lanczos3);
    let (x, y) = layout.photo_origin(canvas.width(), canvas.height());
    imageops::overlay(canvas, &resized, x, y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ACCENT;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn template() -> RgbaImage {
        RgbaImage::from_pixel(1080, 1350, WHITE)
    }

    fn record() -> Record {
        Record {
            row: 1,
            age: "34".into(),
            location: "Nairobi".into(),
            languages: "English and Swahili".into(),
            education: "Diploma in Early Childhood".into(),
            experience: "5".into(),
            salary: "KES 30000".into(),
            availability: "Full time, live-in".into(),
            photo_source: "photos/mary".into(),
        }
    }

    fn has_ink(img: &RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32) -> bool {
        (y0..y1).any(|y| (x0..x1).any(|x| img.get_pixel(x, y)[0] < 128))
    }

    #[test]
    fn description_interpolates_record() {
        let text = description("Mary Jane", &record());
        assert!(text.contains("experienced, Mary Jane brings 5 years"));
        assert!(text.contains("Fluent in English and Swahili,"));
        assert!(text.ends_with("serve families in Nairobi."));
    }

    #[test]
    fn fields_land_on_their_slots() {
        let layout = Layout::default();
        let mut canvas = template();
        draw_fields(&mut canvas, &layout, &FontSet::builtin(), &record());

        let slots: Vec<_> = Field::ALL.iter().map(|f| layout.value_slots.get(*f)).collect();
        for (i, slot) in slots.iter().enumerate() {
            let (x, y) = (slot.x.unsigned_abs(), slot.y.unsigned_abs());
            assert!(has_ink(&canvas, x, y, x + 40, y + 14), "no ink at slot {i}");
            // Nothing spills into the gap before the next slot
            if let Some(next) = slots.get(i + 1) {
                assert!(!has_ink(&canvas, 0, y + 16, 1080, next.y.unsigned_abs()));
            }
            // Nothing left of the slot on its own line
            assert!(!has_ink(&canvas, 0, y, x, y + 14));
        }
        assert!(!has_ink(&canvas, 0, 0, 1080, slots[0].y.unsigned_abs()));
    }

    #[test]
    fn long_values_still_start_at_slot() {
        let layout = Layout::default();
        let mut r = record();
        r.salary = "X".repeat(200);
        let mut canvas = template();
        draw_fields(&mut canvas, &layout, &FontSet::builtin(), &r);

        let slot = layout.value_slots.get(Field::Salary);
        let (x, y) = (slot.x.unsigned_abs(), slot.y.unsigned_abs());
        assert!(!has_ink(&canvas, 0, y, x, y + 14));
        // Overflows to the right edge rather than wrapping
        assert!(has_ink(&canvas, 1060, y, 1080, y + 14));
    }

    #[test]
    fn photo_is_pasted_from_bottom_right() {
        let layout = Layout::default();
        let mut canvas = template();
        let cutout = RgbaImage::from_pixel(10, 15, Rgba([200, 0, 0, 255]));
        paste_photo(&mut canvas, &layout, &cutout);

        let reddish = |p: &Rgba<u8>| p[0] > 190 && p[1] < 10 && p[2] < 10;
        assert!(reddish(canvas.get_pixel(720, 860)));
        assert!(reddish(canvas.get_pixel(1079, 1349)));
        assert_eq!(*canvas.get_pixel(700, 860), WHITE);
        assert_eq!(*canvas.get_pixel(720, 840), WHITE);
    }

    #[test]
    fn transparent_cutout_leaves_template_untouched() {
        let layout = Layout::default();
        let mut canvas = template();
        paste_photo(&mut canvas, &layout, &RgbaImage::new(8, 8));
        assert!(canvas.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn composed_card_keeps_template_size_and_accent_title() {
        let layout = Layout::default();
        let cutout = RgbaImage::from_pixel(4, 6, Rgba([10, 200, 10, 255]));
        let card =
            compose(&template(), &layout, &FontSet::builtin(), "Mary Jane", &record(), &cutout);

        assert_eq!(card.dimensions(), (1080, 1350));
        let title_rows = 230..270;
        let accent = (0..1080)
            .flat_map(|x| title_rows.clone().map(move |y| (x, y)))
            .any(|(x, y)| *card.get_pixel(x, y) == ACCENT);
        assert!(accent, "title should be drawn in the accent color");
        // Description block sits around y=400
        assert!(has_ink(&card, 0, 360, 1080, 440));
    }
}
