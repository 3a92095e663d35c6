//! Everything around the grid: page routes, the project catalog, the
//! submission form and the animated title.

pub mod records;
pub mod routes;
pub mod submission;
pub mod title;

pub use records::{ProjectDirectory, ProjectRecord};
pub use routes::Route;
pub use submission::{Submission, SubmissionForm, SubmitError};
pub use title::TitleAnimator;
