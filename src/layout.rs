//! Pixel coordinate contract of the profile template.
//!
//! Every coordinate that depends on the template artwork lives in [`Layout`].
//! Swapping the template means replacing the whole value, and
//! [`Layout::check_fits`] refuses templates that are too small for it.

use image::Rgba;

use crate::error::ProfileError;
use crate::sheet::Record;

/// Accent color for the title and subtitle.
pub const ACCENT: Rgba<u8> = Rgba([25, 25, 112, 255]);
/// Body text color.
pub const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Fixed subtitle under the title.
pub const SUBTITLE: &str = "YOUR NEW NANNY";

/// A labeled value printed next to the template's field captions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Age in years.
    Age,
    /// Location served.
    Location,
    /// Spoken languages.
    Languages,
    /// Education.
    Education,
    /// Years of experience.
    Experience,
    /// Expected salary.
    Salary,
    /// Availability.
    Availability,
}

impl Field {
    /// Every field, top to bottom on the template.
    pub const ALL: [Field; 7] = [
        Field::Age,
        Field::Location,
        Field::Languages,
        Field::Education,
        Field::Experience,
        Field::Salary,
        Field::Availability,
    ];

    /// The text drawn for this field.
    #[must_use]
    pub fn value(self, record: &Record) -> String {
        match self {
            Field::Age => record.age.clone(),
            Field::Location => record.location.clone(),
            Field::Languages => record.languages.clone(),
            Field::Education => record.education.clone(),
            Field::Experience => format!("{} years", record.experience),
            Field::Salary => record.salary.clone(),
            Field::Availability => record.availability.clone(),
        }
    }
}

/// A pixel position on the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// Horizontal offset from the left edge.
    pub x: i32,
    /// Vertical offset from the top edge.
    pub y: i32,
}

impl Point {
    /// Shorthand constructor.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Top-left anchor of each field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSlots {
    /// Slot for [`Field::Age`].
    pub age: Point,
    /// Slot for [`Field::Location`].
    pub location: Point,
    /// Slot for [`Field::Languages`].
    pub languages: Point,
    /// Slot for [`Field::Education`].
    pub education: Point,
    /// Slot for [`Field::Experience`].
    pub experience: Point,
    /// Slot for [`Field::Salary`].
    pub salary: Point,
    /// Slot for [`Field::Availability`].
    pub availability: Point,
}

impl ValueSlots {
    /// Coordinate at which `field` is drawn.
    #[must_use]
    pub fn get(&self, field: Field) -> Point {
        match field {
            Field::Age => self.age,
            Field::Location => self.location,
            Field::Languages => self.languages,
            Field::Education => self.education,
            Field::Experience => self.experience,
            Field::Salary => self.salary,
            Field::Availability => self.availability,
        }
    }
}

/// Which scalable face a text element uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    /// The bold face.
    Bold,
    /// The regular face.
    Regular,
}

/// Size, face and color of one text element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Pixel size for scalable fonts.
    pub size: f32,
    /// Face selection.
    pub weight: Weight,
    /// Fill color.
    pub color: Rgba<u8>,
}

/// Coordinates, styles and photo geometry for one template.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Vertical center of the title line.
    pub title_y: i32,
    /// Vertical center of the subtitle line.
    pub subtitle_y: i32,
    /// Vertical center of the description block.
    pub description_y: i32,
    /// Wrap width of the description, in characters.
    pub description_columns: usize,
    /// Extra pixels between description lines.
    pub line_spacing: i32,
    /// Title style.
    pub title: TextStyle,
    /// Subtitle style.
    pub subtitle: TextStyle,
    /// Description style.
    pub description: TextStyle,
    /// Field value style.
    pub value: TextStyle,
    /// Field value anchors.
    pub value_slots: ValueSlots,
    /// Size the cutout photo is resized to.
    pub photo_size: (u32, u32),
    /// Distance of the photo's top-left corner from the template's
    /// bottom-right corner.
    pub photo_offset: (u32, u32),
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            title_y: 250,
            subtitle_y: 310,
            description_y: 400,
            description_columns: 70,
            line_spacing: 6,
            title: TextStyle { size: 55.0, weight: Weight::Bold, color: ACCENT },
            subtitle: TextStyle { size: 30.0, weight: Weight::Bold, color: ACCENT },
            description: TextStyle { size: 24.0, weight: Weight::Regular, color: INK },
            value: TextStyle { size: 22.0, weight: Weight::Bold, color: INK },
            value_slots: ValueSlots {
                age: Point::new(230, 527),
                location: Point::new(285, 587),
                languages: Point::new(317, 641),
                education: Point::new(303, 706),
                experience: Point::new(315, 765),
                salary: Point::new(265, 824),
                availability: Point::new(320, 888),
            },
            photo_size: (400, 600),
            photo_offset: (370, 500),
        }
    }
}

impl Layout {
    /// Top-left corner of the photo on a `width` x `height` template.
    #[must_use]
    pub fn photo_origin(&self, width: u32, height: u32) -> (i64, i64) {
        (
            i64::from(width) - i64::from(self.photo_offset.0),
            i64::from(height) - i64::from(self.photo_offset.1),
        )
    }

    /// Verify that every anchor lands inside a `width` x `height` template.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Template`] naming the first anchor that falls
    /// outside the image.
    pub fn check_fits(&self, width: u32, height: u32) -> Result<(), ProfileError> {
        let inside = |p: Point| {
            p.x >= 0
                && p.y >= 0
                && i64::from(p.x) < i64::from(width)
                && i64::from(p.y) < i64::from(height)
        };

        let centre_x = i32::try_from(width / 2).unwrap_or(i32::MAX);
        let lines = [
            ("title", self.title_y),
            ("subtitle", self.subtitle_y),
            ("description", self.description_y),
        ];
        for (name, y) in lines {
            if !inside(Point::new(centre_x, y)) {
                return Err(ProfileError::Template(format!(
                    "{width}x{height} template has no room for the {name} at y={y}"
                )));
            }
        }

        for field in Field::ALL {
            let slot = self.value_slots.get(field);
            if !inside(slot) {
                return Err(ProfileError::Template(format!(
                    "{width}x{height} template has no room for {field:?} at ({}, {})",
                    slot.x, slot.y
                )));
            }
        }

        let (x, y) = self.photo_origin(width, height);
        if x < 0 || y < 0 {
            return Err(ProfileError::Template(format!(
                "{width}x{height} template is smaller than the photo offset {:?}",
                self.photo_offset
            )));
        }
        Ok(())
    }
}
