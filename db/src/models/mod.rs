mod game;
mod question;
mod round;
mod user;

pub use self::game::*;
pub use self::question::*;
pub use self::round::*;
pub use self::user::*;
