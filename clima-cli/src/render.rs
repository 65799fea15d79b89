use std::io::{self, Write};

use clima_core::presentation::{Rgb, ScreenBody, ScreenModel, WeatherDetails};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

const WIDTH: usize = 44;
const CARD_MARGIN: usize = 3;

const SEARCH_LABEL: &str = "  Cidade ...";
const SEARCH_BUTTON: &str = " Buscar ";

const LIGHT_TEXT: Rgb = Rgb(0xff, 0xff, 0xff);
const DARK_TEXT: Rgb = Rgb(0x22, 0x22, 0x22);

/// One terminal row: text on a solid background.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub background: Rgb,
    pub foreground: Rgb,
    /// Card rows are inset by `CARD_MARGIN` columns of page background.
    pub card: bool,
    /// Search button stops, painted across `SEARCH_BUTTON` at the row's end.
    pub button: Option<[Rgb; 2]>,
}

pub fn print_screen(model: &ScreenModel) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_screen(&mut out, model)?;
    out.flush()
}

pub fn write_screen(out: &mut impl Write, model: &ScreenModel) -> io::Result<()> {
    let lines = screen_lines(model);
    let total = lines.len();
    let page = model.palette.background();

    for (row, line) in lines.iter().enumerate() {
        let page_bg = gradient_at(page, fraction(row, total));

        if let Some(stops) = line.button {
            let width = SEARCH_BUTTON.chars().count();
            queue!(
                out,
                SetBackgroundColor(color(page_bg)),
                SetForegroundColor(color(line.foreground)),
                Print(pad(&line.text, WIDTH - width)),
            )?;
            for (i, ch) in SEARCH_BUTTON.chars().enumerate() {
                queue!(
                    out,
                    SetBackgroundColor(color(gradient_at(&stops, fraction(i, width)))),
                    Print(ch),
                )?;
            }
        } else if line.card {
            let inner = WIDTH - 2 * CARD_MARGIN;
            queue!(
                out,
                SetBackgroundColor(color(page_bg)),
                Print(" ".repeat(CARD_MARGIN)),
                SetBackgroundColor(color(line.background)),
                SetForegroundColor(color(line.foreground)),
                Print(pad(&line.text, inner)),
                SetBackgroundColor(color(page_bg)),
                Print(" ".repeat(CARD_MARGIN)),
            )?;
        } else {
            queue!(
                out,
                SetBackgroundColor(color(page_bg)),
                SetForegroundColor(color(line.foreground)),
                Print(pad(&line.text, WIDTH)),
            )?;
        }

        queue!(out, ResetColor, Print("\n"))?;
    }

    Ok(())
}

/// Lay out the screen without touching the terminal.
pub fn screen_lines(model: &ScreenModel) -> Vec<Line> {
    let page_line = |text: String| Line {
        text,
        background: model.palette.background()[0],
        foreground: LIGHT_TEXT,
        card: false,
        button: None,
    };

    let search_bar = Line {
        button: Some(model.palette.button()),
        ..page_line(SEARCH_LABEL.to_string())
    };

    let mut header = vec![page_line(String::new()), search_bar, page_line(String::new())];
    let card_rows = match &model.body {
        ScreenBody::Placeholder(message) => {
            header.push(page_line(String::new()));
            let mut rows = vec![String::new()];
            rows.extend(wrap(message, WIDTH - 2 * CARD_MARGIN - 4).into_iter().map(|l| {
                center(&l, WIDTH - 2 * CARD_MARGIN)
            }));
            rows.push(String::new());
            rows
        }
        ScreenBody::Weather(details) => {
            header.push(page_line(format!("  > {}", details.location_name)));
            weather_card(details)
        }
    };
    header.push(page_line(String::new()));

    let card = model.palette.card();
    let count = card_rows.len();
    let mut lines = header;
    lines.extend(card_rows.into_iter().enumerate().map(|(i, text)| Line {
        text,
        background: gradient_at(card, fraction(i, count)),
        foreground: DARK_TEXT,
        card: true,
        button: None,
    }));
    lines.push(page_line(String::new()));
    lines
}

fn weather_card(details: &WeatherDetails) -> Vec<String> {
    let inner = WIDTH - 2 * CARD_MARGIN;
    let mut rows = vec![String::new()];

    rows.extend(details.asset.glyph().iter().map(|g| center(g, inner)));
    rows.push(String::new());
    rows.push(center(&details.description, inner));
    rows.push(String::new());

    let temp = format!("{}°C", details.temperature);
    let wind = format!("Vento {} km/h", details.wind_kph);
    let humidity = format!("Umidade {}%", details.humidity_pct);
    rows.push(format!("  {:<10}|  {}", temp, wind));
    rows.push(format!("  {:<10}|  {}", "", humidity));
    rows.push(String::new());
    rows.push(center(
        &format!("min {}°C  ·  max {}°C", details.min, details.max),
        inner,
    ));
    rows.push(String::new());
    rows
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

fn fraction(index: usize, count: usize) -> f64 {
    if count <= 1 {
        0.0
    } else {
        index as f64 / (count - 1) as f64
    }
}

/// Color at `t` (0..=1) along evenly spaced gradient stops.
pub fn gradient_at(stops: &[Rgb], t: f64) -> Rgb {
    match stops {
        [] => DARK_TEXT,
        [only] => *only,
        _ => {
            let t = t.clamp(0.0, 1.0);
            let scaled = t * (stops.len() - 1) as f64;
            let idx = (scaled.floor() as usize).min(stops.len() - 2);
            let local = scaled - idx as f64;
            let (a, b) = (stops[idx], stops[idx + 1]);
            let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * local).round() as u8;
            Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
        }
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.chars().take(width).collect()
    } else {
        format!("{text}{}", " ".repeat(width - len))
    }
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
