mod hobby;

pub use hobby::FitHobby;
