use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use solo_quantities::{Cost, KilowattHours};
use solo_settlement::{Breakdown, Settlement, message::format_date};

pub fn build_settlement_table(settlement: &Settlement) -> Table {
    let energy_rows = match settlement.breakdown {
        Breakdown::Simple { grid_consumption, solar_export } => {
            vec![("Grid consumption", grid_consumption), ("Solar export", solar_export)]
        }
        Breakdown::Monitoring {
            grid_consumption,
            grid_injection,
            solar_generation,
            self_consumption,
        } => vec![
            ("Solar generation", solar_generation),
            ("Grid injection", grid_injection),
            ("Self-consumption", self_consumption),
            ("Grid consumption", grid_consumption),
        ],
    };

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["", "Value"]);
    table.add_row(vec![
        Cell::new("Period"),
        Cell::new(format!(
            "{} – {}",
            format_date(settlement.check_in),
            format_date(settlement.check_out)
        )),
    ]);
    table.add_row(vec![
        Cell::new("Days"),
        Cell::new(settlement.n_days).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Mode"),
        Cell::new(settlement.mode()).add_attribute(Attribute::Dim),
    ]);
    for (label, energy) in energy_rows {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Dim),
            Cell::new(energy).set_alignment(CellAlignment::Right).fg(
                if energy > KilowattHours::ZERO { Color::Reset } else { Color::DarkGrey },
            ),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total consumption").add_attribute(Attribute::Bold),
        Cell::new(settlement.total_consumption)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Tariff"),
        Cell::new(settlement.tariff).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Charge").add_attribute(Attribute::Bold),
        Cell::new(settlement.charge)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold)
            .fg(if settlement.charge >= Cost::ONE_CENT { Color::Red } else { Color::Green }),
    ]);
    table
}
