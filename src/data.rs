pub mod gemini;
pub mod openweather;
