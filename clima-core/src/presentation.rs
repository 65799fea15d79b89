//! Pure mapping from weather data to what the screen shows.
//!
//! Nothing here holds state: every function is evaluated fresh on each render.

use crate::{model::WeatherRecord, state::DisplayState};

/// Temperatures strictly above this (°C) get the warm palette.
pub const WARM_THRESHOLD_C: f64 = 24.0;

pub const PLACEHOLDER_MESSAGE: &str = "Ative sua localização ou pesquise por uma cidade";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

const WARM_BACKGROUND: [Rgb; 3] = [
    Rgb::new(0xd0, 0xee, 0x25),
    Rgb::new(0xf8, 0x95, 0x00),
    Rgb::new(0xb6, 0x36, 0x36),
];
const COOL_BACKGROUND: [Rgb; 3] = [
    Rgb::new(0x3f, 0x00, 0xee),
    Rgb::new(0x5d, 0x94, 0x9e),
    Rgb::new(0xf0, 0xf0, 0xf0),
];
const CARD: [Rgb; 2] = [Rgb::new(0xce, 0xce, 0xce), Rgb::new(0xff, 0xff, 0xff)];

/// Gradient colors chosen from the current temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    Warm,
    #[default]
    Cool,
}

impl Palette {
    pub fn background(&self) -> &'static [Rgb; 3] {
        match self {
            Palette::Warm => &WARM_BACKGROUND,
            Palette::Cool => &COOL_BACKGROUND,
        }
    }

    /// The search button uses the first two background stops.
    pub fn button(&self) -> [Rgb; 2] {
        let bg = self.background();
        [bg[0], bg[1]]
    }

    pub fn card(&self) -> &'static [Rgb; 2] {
        &CARD
    }
}

/// Warm iff a temperature is known and strictly above the threshold.
pub fn select_gradient(temperature: Option<f64>) -> Palette {
    match temperature {
        None => Palette::Cool,
        Some(t) if t > WARM_THRESHOLD_C => Palette::Warm,
        Some(_) => Palette::Cool,
    }
}

/// Condition categories that have their own artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionCategory {
    Clouds,
    Clear,
    Rain,
    Snow,
    Drizzle,
    /// Anything else the provider may send, e.g. "Thunderstorm" or "Mist".
    Other,
}

impl ConditionCategory {
    /// Exact, case-sensitive match on the provider's category label.
    pub fn parse(label: &str) -> Self {
        match label {
            "Clouds" => Self::Clouds,
            "Clear" => Self::Clear,
            "Rain" => Self::Rain,
            "Snow" => Self::Snow,
            "Drizzle" => Self::Drizzle,
            _ => Self::Other,
        }
    }

    pub fn asset(&self) -> Asset {
        match self {
            Self::Clouds => Asset::Clouds,
            Self::Clear => Asset::Clear,
            Self::Rain => Asset::Rain,
            Self::Snow => Asset::Snow,
            Self::Drizzle => Asset::Drizzle,
            Self::Other => Asset::Mist,
        }
    }
}

/// Bundled condition images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    Clouds,
    Clear,
    Rain,
    Snow,
    Drizzle,
    Mist,
}

impl Asset {
    pub const fn all() -> &'static [Asset] {
        &[
            Asset::Clouds,
            Asset::Clear,
            Asset::Rain,
            Asset::Snow,
            Asset::Drizzle,
            Asset::Mist,
        ]
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Asset::Clouds => "clouds.png",
            Asset::Clear => "clear.png",
            Asset::Rain => "rain.png",
            Asset::Snow => "snow.png",
            Asset::Drizzle => "drizzle.png",
            Asset::Mist => "mist.png",
        }
    }

    /// Small text rendition for terminals.
    pub fn glyph(&self) -> &'static [&'static str] {
        match self {
            Asset::Clouds => &["   .--.    ", ".-(    ).  ", "(___.__)__)"],
            Asset::Clear => &["  \\   /  ", "   .-.   ", "― (   ) ―", "   `-'   ", "  /   \\  "],
            Asset::Rain => &[" .-.   ", "(   ). ", "(___(__)", " ʻ ʻ ʻ ʻ", "ʻ ʻ ʻ ʻ "],
            Asset::Snow => &[" .-.    ", "(   ).  ", "(___(__)", " *  *  *", "*  *  * "],
            Asset::Drizzle => &[" .-.    ", "(   ).  ", "(___(__)", "  ‘ ‘ ‘ ", " ‘ ‘ ‘  "],
            Asset::Mist => &[" _ - _ - _ ", "  _ - _ -  ", " _ - _ - _ "],
        }
    }
}

/// Total: every label maps to an asset, unknown labels to the mist image.
pub fn select_image(category: &str) -> Asset {
    ConditionCategory::parse(category).asset()
}

/// Everything a loaded screen shows, derived from a single record.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherDetails {
    pub location_name: String,
    pub asset: Asset,
    pub description: String,
    pub temperature: i64,
    pub min: i64,
    pub max: i64,
    pub humidity_pct: u8,
    pub wind_kph: f64,
}

impl WeatherDetails {
    pub fn from_record(record: &WeatherRecord) -> Self {
        let primary = record.primary_condition();

        Self {
            location_name: record.location_name.clone(),
            asset: select_image(primary.map(|c| c.category.as_str()).unwrap_or_default()),
            description: capitalize_words(
                primary.map(|c| c.description.as_str()).unwrap_or_default(),
            ),
            temperature: record.temperature.current.round() as i64,
            min: record.temperature.min.round() as i64,
            max: record.temperature.max.round() as i64,
            humidity_pct: record.temperature.humidity_pct,
            wind_kph: record.wind.speed_kph,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenBody {
    Placeholder(&'static str),
    Weather(WeatherDetails),
}

/// View model for one render of the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenModel {
    pub palette: Palette,
    pub body: ScreenBody,
}

impl ScreenModel {
    pub fn from_state(state: &DisplayState) -> Self {
        match state {
            DisplayState::NoData => Self {
                palette: select_gradient(None),
                body: ScreenBody::Placeholder(PLACEHOLDER_MESSAGE),
            },
            DisplayState::Loaded(record) => Self {
                palette: select_gradient(Some(record.temperature.current)),
                body: ScreenBody::Weather(WeatherDetails::from_record(record)),
            },
        }
    }
}

fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
