pub use self::costs::*;

pub use self::fleet::*;

mod jobs;
pub use self::jobs::*;
