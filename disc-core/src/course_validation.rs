use disc_types::{Course, CourseError, CourseId, Hole, HoleProblem, NewCourse, NewHole};

pub const MIN_PAR: i64 = 1;
pub const MAX_PAR: i64 = 7;

pub struct CourseValidator;

impl CourseValidator {
    /// Validate a candidate and turn it into a [`Course`].
    ///
    /// Rules are checked in order and the first violation wins:
    /// name and holes present, name not blank, at least one hole, then every
    /// hole in turn. `assign_id` is only called when the candidate carries no
    /// id of its own and everything else passed.
    pub fn validate(
        candidate: NewCourse,
        assign_id: impl FnOnce() -> CourseId,
    ) -> Result<Course, CourseError> {
        let (name, holes) = match (candidate.name, candidate.holes) {
            (Some(name), Some(holes)) if !name.is_empty() => (name, holes),
            _ => return Err(CourseError::MissingFields),
        };

        if name.trim().is_empty() {
            return Err(CourseError::EmptyName);
        }

        if holes.is_empty() {
            return Err(CourseError::NoHoles);
        }

        let holes = holes
            .iter()
            .enumerate()
            .map(|(index, hole)| {
                Self::validate_hole(hole).map_err(|reason| CourseError::InvalidHole { index, reason })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let id = candidate.id.unwrap_or_else(assign_id);

        Ok(Course { id, name, holes })
    }

    pub fn validate_hole(hole: &NewHole) -> Result<Hole, HoleProblem> {
        let id = match hole.id {
            Some(id) if id > 0 => id,
            _ => return Err(HoleProblem::MissingId),
        };

        let distance = match hole.distance {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => return Err(HoleProblem::InvalidDistance),
        };

        let par = match hole.par {
            Some(p) if (MIN_PAR..=MAX_PAR).contains(&p) => p as u8,
            _ => return Err(HoleProblem::InvalidPar),
        };

        Ok(Hole { id, distance, par })
    }
}
