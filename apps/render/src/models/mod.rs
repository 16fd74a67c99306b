pub mod resume;
pub mod style;

pub use resume::ResumeRecord;
pub use style::{
    AccentSlot, BaseTheme, BorderStyle, HexColor, Rgb, SectionAccents, StyleFields, StyleProfile,
};
