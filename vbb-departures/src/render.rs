//! Departure table rendering.

use std::io::{self, Write};

use console::Style;
use tabled::builder::Builder;
use tabled::settings::Style as TableStyle;

use crate::domain::{Departure, Product};

/// Printed instead of a table when there is nothing to show.
pub const NO_DEPARTURES: &str = "No departures.";

/// Whether rendered output carries ANSI colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Plain,
    Coloured,
}

impl Theme {
    /// Colour when stdout is a terminal that supports it, plain otherwise.
    pub fn detect() -> Self {
        if console::colors_enabled() {
            Theme::Coloured
        } else {
            Theme::Plain
        }
    }

    fn paint(self, text: &str, style: Style) -> String {
        match self {
            Theme::Coloured if !text.is_empty() => style.force_styling(true).apply_to(text).to_string(),
            _ => text.to_string(),
        }
    }
}

/// Render departures as a borderless table, one line per departure, in
/// input order.
pub fn departures_table(departures: &[Departure], theme: Theme) -> String {
    if departures.is_empty() {
        return format!("{}\n", theme.paint(NO_DEPARTURES, Style::new().red()));
    }

    let mut builder = Builder::default();
    for departure in departures {
        builder.push_record(row(departure, theme));
    }

    let mut table = builder.build();
    table.with(TableStyle::blank());

    format!("{table}\n")
}

/// Cells for one departure: glyph, line, scheduled time, realtime, direction.
pub fn row(departure: &Departure, theme: Theme) -> [String; 5] {
    [
        theme.paint(departure.product.glyph(), product_style(departure.product)),
        theme.paint(&single_line(&departure.line), Style::new().bold()),
        scheduled(departure),
        theme.paint(&realtime(departure), realtime_style(departure)),
        single_line(departure.direction.as_deref().unwrap_or_default()),
    ]
}

/// Scheduled time as `HH:MM` in the departure's own offset.
pub fn scheduled(departure: &Departure) -> String {
    departure.scheduled.format("%H:%M").to_string()
}

/// Realtime delta, rounded to whole minutes.
///
/// Blank when unknown, `cancelled` for cancelled departures, `on time` when
/// the delay rounds to zero.
pub fn realtime(departure: &Departure) -> String {
    if departure.cancelled {
        return "cancelled".to_string();
    }

    let Some(minutes) = delay_minutes(departure) else {
        return String::new();
    };

    match minutes {
        0 => "on time".to_string(),
        m if m > 0 => format!("+{m} min"),
        m => format!("{m} min"),
    }
}

/// Write rendered output, treating a closed pipe as success.
pub fn emit<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn delay_minutes(departure: &Departure) -> Option<i64> {
    departure
        .delay
        .map(|delay| (delay.num_seconds() + 30).div_euclid(60))
}

fn product_style(product: Product) -> Style {
    let style = Style::new().bold();
    match product {
        Product::Suburban => style.green(),
        Product::Subway => style.blue(),
        Product::Tram => style.red(),
        Product::Bus => style.magenta(),
        Product::Ferry => style.cyan(),
        Product::Express | Product::Regional => style.yellow(),
    }
}

fn realtime_style(departure: &Departure) -> Style {
    match delay_minutes(departure) {
        _ if departure.cancelled => Style::new().red(),
        Some(m) if m > 0 => Style::new().red(),
        _ => Style::new().green(),
    }
}

/// Cell text on one line: control characters become spaces.
fn single_line(text: &str) -> String {
    text.chars().map(|c| if c.is_control() { ' ' } else { c }).collect()
}
