pub mod headless;

pub use headless::HeadlessPlatform;
