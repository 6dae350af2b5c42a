use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Creation-timestamp-derived identifier (milliseconds since the epoch).
pub type CourseId = i64;
pub type HoleId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Hole {
    pub id: HoleId,
    pub distance: f64, // feet
    pub par: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Course {
    #[ts(type = "number")]
    pub id: CourseId,
    pub name: String,
    pub holes: Vec<Hole>,
}

impl Course {
    pub fn total_par(&self) -> u32 {
        self.holes.iter().map(|h| u32::from(h.par)).sum()
    }

    pub fn total_distance(&self) -> f64 {
        self.holes.iter().map(|h| h.distance).sum()
    }
}

/// Unvalidated course input, as it arrives from a form or an old storage blob.
///
/// Every field is optional so that a missing value can be reported as a
/// validation failure instead of a deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct NewCourse {
    #[ts(type = "number | null")]
    pub id: Option<CourseId>,
    pub name: Option<String>,
    pub holes: Option<Vec<NewHole>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct NewHole {
    pub id: Option<HoleId>,
    pub distance: Option<f64>,
    #[ts(type = "number | null")]
    pub par: Option<i64>,
}

impl NewHole {
    pub fn new(id: HoleId, distance: f64, par: i64) -> Self {
        Self {
            id: Some(id),
            distance: Some(distance),
            par: Some(par),
        }
    }
}

impl NewCourse {
    /// Build a candidate from `(distance, par)` rows, numbering holes `1..=n`
    /// in the order given.
    pub fn from_layout(
        name: impl Into<String>,
        layout: impl IntoIterator<Item = (f64, i64)>,
    ) -> Self {
        let holes = layout
            .into_iter()
            .zip(1..)
            .map(|((distance, par), id)| NewHole::new(id, distance, par))
            .collect();

        Self {
            id: None,
            name: Some(name.into()),
            holes: Some(holes),
        }
    }

    pub fn with_id(mut self, id: CourseId) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<&Course> for NewCourse {
    fn from(course: &Course) -> Self {
        NewCourse {
            id: Some(course.id),
            name: Some(course.name.clone()),
            holes: Some(
                course
                    .holes
                    .iter()
                    .map(|h| NewHole::new(h.id, h.distance, i64::from(h.par)))
                    .collect(),
            ),
        }
    }
}
