//! Guest-facing settlement message.
//!
//! Rendering is a pure function of the settlement, the contact, and the locale,
//! so the copied text and the text sent through the messaging app are always identical.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    contact::GuestContact,
    settlement::{Breakdown, Settlement},
};

/// Date format used in guest messages.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    /// Brazilian Portuguese.
    #[default]
    PtBr,

    /// English.
    En,
}

impl Locale {
    const fn template(self) -> &'static Template {
        match self {
            Self::PtBr => &PT_BR,
            Self::En => &EN,
        }
    }
}

struct Template {
    hello: &'static str,
    intro: &'static str,
    period: &'static str,
    period_separator: &'static str,
    days: &'static str,
    day: &'static str,
    day_plural: &'static str,
    solar_generation: &'static str,
    grid_injection: &'static str,
    self_consumption: &'static str,
    grid_consumption: &'static str,
    solar_export: &'static str,
    total_consumption: &'static str,
    tariff: &'static str,
    charge: &'static str,
    currency: &'static str,
    payment_key: &'static str,
    thanks: &'static str,
    signature: &'static str,
}

const PT_BR: Template = Template {
    hello: "Olá",
    intro: "Segue o resumo do consumo de energia da sua estadia:",
    period: "Período",
    period_separator: "a",
    days: "Dias",
    day: "dia",
    day_plural: "dias",
    solar_generation: "☀️ Geração solar",
    grid_injection: "🔄 Injetado na rede",
    self_consumption: "🏠 Autoconsumo solar",
    grid_consumption: "⚡ Consumo da rede",
    solar_export: "☀️ Energia solar exportada",
    total_consumption: "Consumo total",
    tariff: "Tarifa",
    charge: "Valor da energia",
    currency: "R$",
    payment_key: "Chave PIX para pagamento",
    thanks: "Obrigado pela preferência!",
    signature: "Calculado por Solo Energia",
};

const EN: Template = Template {
    hello: "Hello",
    intro: "Here is the energy summary of your stay:",
    period: "Period",
    period_separator: "to",
    days: "Days",
    day: "day",
    day_plural: "days",
    solar_generation: "☀️ Solar generation",
    grid_injection: "🔄 Exported to the grid",
    self_consumption: "🏠 Solar self-consumption",
    grid_consumption: "⚡ Grid consumption",
    solar_export: "☀️ Solar export",
    total_consumption: "Total consumption",
    tariff: "Tariff",
    charge: "Energy charge",
    currency: "BRL",
    payment_key: "Payment key",
    thanks: "Thank you for staying with us!",
    signature: "Calculated by Solo Energia",
};

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Render the multi-line guest message.
#[must_use]
pub fn render(settlement: &Settlement, contact: &GuestContact, locale: Locale) -> String {
    let template = locale.template();
    let day_label = if settlement.n_days == 1 { template.day } else { template.day_plural };

    let mut lines = vec![
        format!("⚡ *{} {}!*", template.hello, contact.name),
        String::new(),
        template.intro.to_owned(),
        String::new(),
        format!(
            "📅 *{}:* {} {} {}",
            template.period,
            format_date(settlement.check_in),
            template.period_separator,
            format_date(settlement.check_out),
        ),
        format!("📆 *{}:* {} {day_label}", template.days, settlement.n_days),
        String::new(),
    ];
    match settlement.breakdown {
        Breakdown::Simple { grid_consumption, solar_export } => {
            lines.push(format!("{}: {:.1} kWh", template.grid_consumption, grid_consumption.0));
            lines.push(format!("{}: {:.1} kWh", template.solar_export, solar_export.0));
        }
        Breakdown::Monitoring {
            grid_consumption,
            grid_injection,
            solar_generation,
            self_consumption,
        } => {
            lines.push(format!("{}: {:.1} kWh", template.solar_generation, solar_generation.0));
            lines.push(format!("{}: {:.1} kWh", template.grid_injection, grid_injection.0));
            lines.push(format!("{}: {:.1} kWh", template.self_consumption, self_consumption.0));
            lines.push(format!("{}: {:.1} kWh", template.grid_consumption, grid_consumption.0));
        }
    }
    lines.extend([
        String::new(),
        format!("📊 *{}: {:.1} kWh*", template.total_consumption, settlement.total_consumption.0),
        String::new(),
        format!("💰 {}: {} {:.2}/kWh", template.tariff, template.currency, settlement.tariff.0),
        format!("💵 *{}: {} {:.2}*", template.charge, template.currency, settlement.charge.0),
    ]);
    if let Some(payment_key) = &contact.payment_key {
        lines.extend([
            String::new(),
            format!("💳 *{}:*", template.payment_key),
            payment_key.clone(),
        ]);
    }
    lines.extend([
        String::new(),
        format!("_{}_", template.thanks),
        format!("_{}_", template.signature),
    ]);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use solo_quantities::{KilowattHourRate, KilowattHours};

    use super::*;
    use crate::{
        period::StayPeriod,
        reading::{MeterReading, Readings},
    };

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn reading(entry: f64, exit: f64) -> MeterReading {
        MeterReading::new(KilowattHours(entry), KilowattHours(exit))
    }

    fn simple_settlement() -> Settlement {
        let readings = Readings {
            grid_import: reading(100.0, 150.0),
            grid_export: reading(20.0, 35.0),
            generation: None,
        };
        Settlement::try_compute(
            StayPeriod::closed(date(2024, 1, 1), date(2024, 1, 5)),
            &readings,
            KilowattHourRate(1.10),
        )
        .unwrap()
    }

    fn monitoring_settlement() -> Settlement {
        let readings = Readings {
            grid_import: reading(100.0, 150.0),
            grid_export: reading(20.0, 35.0),
            generation: Some(reading(500.0, 620.0)),
        };
        Settlement::try_compute(
            StayPeriod::closed(date(2024, 1, 1), date(2024, 1, 2)),
            &readings,
            KilowattHourRate(0.75),
        )
        .unwrap()
    }

    fn contact(payment_key: Option<&str>) -> GuestContact {
        GuestContact {
            name: "Maria".to_owned(),
            phone: None,
            payment_key: payment_key.map(str::to_owned),
        }
    }

    #[test]
    fn test_render_simple_pt_br() {
        let message = render(&simple_settlement(), &contact(None), Locale::PtBr);
        assert_eq!(
            message,
            "⚡ *Olá Maria!*\n\
             \n\
             Segue o resumo do consumo de energia da sua estadia:\n\
             \n\
             📅 *Período:* 01/01/2024 a 05/01/2024\n\
             📆 *Dias:* 4 dias\n\
             \n\
             ⚡ Consumo da rede: 50.0 kWh\n\
             ☀️ Energia solar exportada: 15.0 kWh\n\
             \n\
             📊 *Consumo total: 65.0 kWh*\n\
             \n\
             💰 Tarifa: R$ 1.10/kWh\n\
             💵 *Valor da energia: R$ 71.50*\n\
             \n\
             _Obrigado pela preferência!_\n\
             _Calculado por Solo Energia_"
        );
    }

    #[test]
    fn test_render_monitoring_en_with_payment_key() {
        let message = render(&monitoring_settlement(), &contact(Some("maria@pix")), Locale::En);
        assert_eq!(
            message,
            "⚡ *Hello Maria!*\n\
             \n\
             Here is the energy summary of your stay:\n\
             \n\
             📅 *Period:* 01/01/2024 to 02/01/2024\n\
             📆 *Days:* 1 day\n\
             \n\
             ☀️ Solar generation: 120.0 kWh\n\
             🔄 Exported to the grid: 15.0 kWh\n\
             🏠 Solar self-consumption: 105.0 kWh\n\
             ⚡ Grid consumption: 50.0 kWh\n\
             \n\
             📊 *Total consumption: 155.0 kWh*\n\
             \n\
             💰 Tariff: BRL 0.75/kWh\n\
             💵 *Energy charge: BRL 116.25*\n\
             \n\
             💳 *Payment key:*\n\
             maria@pix\n\
             \n\
             _Thank you for staying with us!_\n\
             _Calculated by Solo Energia_"
        );
    }

    #[test]
    fn test_simple_mode_omits_monitoring_lines() {
        let message = render(&simple_settlement(), &contact(None), Locale::PtBr);
        assert!(!message.contains("Autoconsumo"));
        assert!(!message.contains("Geração solar"));
        assert!(!message.contains("Injetado"));
    }

    #[test]
    fn test_payment_key_block_only_when_present() {
        let settlement = monitoring_settlement();
        assert!(!render(&settlement, &contact(None), Locale::PtBr).contains("PIX"));
        let message = render(&settlement, &contact(Some("123.456.789-00")), Locale::PtBr);
        assert!(message.contains("💳 *Chave PIX para pagamento:*\n123.456.789-00\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let settlement = monitoring_settlement();
        let contact = contact(Some("maria@pix"));
        assert_eq!(
            render(&settlement, &contact, Locale::PtBr),
            render(&settlement, &contact, Locale::PtBr)
        );
    }
}
