use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Renders as `#rrggbb`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

const GOOD: Rgb = Rgb::new(60, 179, 113);
const MODERATE: Rgb = Rgb::new(255, 255, 102);
const UNHEALTHY_SENSITIVE: Rgb = Rgb::new(255, 140, 0);
const UNHEALTHY: Rgb = Rgb::new(255, 40, 0);
const HAZARDOUS: Rgb = Rgb::new(128, 0, 128);

/// Text colour that stays readable on top of [`color_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextColor::Black => "black",
            TextColor::White => "white",
        }
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Background colour for an AQI value, blended between the severity anchors.
pub fn color_for(aqi: i32) -> Rgb {
    let (from, to, lower, upper) = match aqi {
        i32::MIN..=50 => return GOOD,
        51..=75 => (GOOD, MODERATE, 50, 75),
        76..=125 => (MODERATE, UNHEALTHY_SENSITIVE, 75, 125),
        126..=175 => (UNHEALTHY_SENSITIVE, UNHEALTHY, 125, 175),
        176..=250 => (UNHEALTHY, HAZARDOUS, 175, 250),
        _ => return HAZARDOUS,
    };
    let p = f64::from(aqi - lower) / f64::from(upper - lower);

    Rgb {
        r: blend(from.r, to.r, p),
        g: blend(from.g, to.g, p),
        b: blend(from.b, to.b, p),
    }
}

pub fn text_color_for(aqi: i32) -> TextColor {
    if aqi <= 100 {
        TextColor::Black
    } else {
        TextColor::White
    }
}

fn blend(a: u8, b: u8, p: f64) -> u8 {
    let v = (f64::from(a) * (1.0 - p) + f64::from(b) * p).round();
    v.clamp(0.0, 255.0) as u8
}
