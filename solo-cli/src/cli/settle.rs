use clap::Parser;
use serde::Serialize;
use solo_quantities::KilowattHourRate;
use solo_settlement::{
    GuestContact,
    Locale,
    Mode,
    PaymentKeyPolicy,
    Settlement,
    SettlementForm,
    ValidationError,
    link::{DEFAULT_BASE_URL, DEFAULT_COUNTRY_PREFIX, messaging_link},
    message::render,
    tariff::parse_tariff,
};

use crate::{prelude::*, tables::build_settlement_table};

#[derive(Parser)]
pub struct SettleArgs {
    #[clap(flatten)]
    host: HostArgs,

    #[clap(flatten)]
    guest: GuestArgs,

    #[clap(flatten)]
    readings: ReadingArgs,

    /// Check-in date, `YYYY-MM-DD`.
    #[clap(long)]
    check_in: Option<String>,

    /// Check-out date, `YYYY-MM-DD`.
    #[clap(long)]
    check_out: Option<String>,

    /// Stay tariff in BRL per kWh, overrides the property tariff. Decimal comma is accepted.
    #[clap(long)]
    tariff: Option<String>,

    /// Settlement mode, inferred from the generation monitor readings when omitted.
    #[clap(long)]
    mode: Option<Mode>,

    #[clap(long, env, default_value = "pt-br")]
    locale: Locale,

    /// Print the report as JSON instead of a table.
    #[clap(long)]
    json: bool,
}

/// Property and host profile settings.
#[derive(Parser)]
struct HostArgs {
    /// Property tariff in BRL per kWh, used when the stay has none.
    #[clap(long, env, default_value = "0.75", value_parser = parse_tariff)]
    property_tariff: KilowattHourRate,

    /// Host's payment key from the profile.
    #[clap(long, env)]
    owner_payment_key: Option<String>,

    #[clap(long, env, default_value = "stay-override")]
    payment_key_policy: PaymentKeyPolicy,

    /// Prepended to guest phone numbers lacking it.
    #[clap(long, env, default_value = DEFAULT_COUNTRY_PREFIX)]
    country_prefix: String,

    #[clap(long, env, default_value = DEFAULT_BASE_URL)]
    messaging_base_url: String,
}

#[derive(Parser)]
struct GuestArgs {
    #[clap(long)]
    guest_name: Option<String>,

    /// Guest phone in any format, only used to build the messaging link.
    #[clap(long)]
    guest_phone: Option<String>,

    /// Per-stay payment key.
    #[clap(long)]
    payment_key: Option<String>,
}

#[derive(Parser)]
struct ReadingArgs {
    /// Utility meter register «code 03» at check-in, kWh.
    #[clap(long)]
    grid_import_entry: Option<String>,

    /// Utility meter register «code 03» at check-out, kWh.
    #[clap(long)]
    grid_import_exit: Option<String>,

    /// Utility meter register «code 103» at check-in, kWh.
    #[clap(long)]
    grid_export_entry: Option<String>,

    /// Utility meter register «code 103» at check-out, kWh.
    #[clap(long)]
    grid_export_exit: Option<String>,

    /// Generation monitor total at check-in, kWh.
    #[clap(long)]
    generation_entry: Option<String>,

    /// Generation monitor total at check-out, kWh.
    #[clap(long)]
    generation_exit: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    settlement: Settlement,
    guest: GuestContact,
    message: String,
    link: Option<String>,
}

impl SettleArgs {
    pub fn run(&self) -> Result {
        let report = self.try_report()?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }
        println!("{}", build_settlement_table(&report.settlement));
        println!();
        println!("{}", report.message);
        if let Some(link) = &report.link {
            println!();
            println!("{link}");
        }
        Ok(())
    }

    #[instrument(skip_all)]
    fn try_report(&self) -> Result<Report, ValidationError> {
        let (settlement, guest) = self.form().try_settle(Some(self.host.property_tariff))?;
        info!(mode = %settlement.mode(), charge = %settlement.charge, "settled");

        let message = render(&settlement, &guest, self.locale);
        let link = guest.phone.as_deref().and_then(|phone| {
            messaging_link(
                &self.host.messaging_base_url,
                Some(phone),
                &self.host.country_prefix,
                &message,
            )
            .inspect_err(|error| warn!(phone, "{error}, skipping the messaging link"))
            .ok()
        });
        Ok(Report { settlement, guest, message, link })
    }

    fn form(&self) -> SettlementForm {
        SettlementForm::builder()
            .maybe_check_in(self.check_in.clone())
            .maybe_check_out(self.check_out.clone())
            .maybe_mode(self.mode)
            .maybe_grid_import_entry(self.readings.grid_import_entry.clone())
            .maybe_grid_import_exit(self.readings.grid_import_exit.clone())
            .maybe_grid_export_entry(self.readings.grid_export_entry.clone())
            .maybe_grid_export_exit(self.readings.grid_export_exit.clone())
            .maybe_generation_entry(self.readings.generation_entry.clone())
            .maybe_generation_exit(self.readings.generation_exit.clone())
            .maybe_tariff(self.tariff.clone())
            .maybe_guest_name(self.guest.guest_name.clone())
            .maybe_guest_phone(self.guest.guest_phone.clone())
            .maybe_payment_key(self.host.payment_key_policy.resolve(
                self.guest.payment_key.as_deref(),
                self.host.owner_payment_key.as_deref(),
            ))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use solo_settlement::Field;

    use super::*;

    /// Parse the arguments of a simple stay, `extra` overriding or adding to them.
    fn parse(extra: &[&str]) -> SettleArgs {
        let defaults = [
            "settle",
            "--check-in=2024-01-01",
            "--check-out=2024-01-05",
            "--grid-import-entry=100",
            "--grid-import-exit=150",
            "--grid-export-entry=20",
            "--grid-export-exit=35",
            "--guest-name=Maria",
            "--property-tariff=0.75",
            "--payment-key-policy=stay-override",
            "--country-prefix=55",
            "--messaging-base-url=https://wa.me",
            "--locale=pt-br",
        ];
        let is_overridden = |arg: &&str| {
            extra.iter().any(|extra| extra.split('=').next() == arg.split('=').next())
        };
        let args = defaults.into_iter().filter(|arg| !is_overridden(arg));
        SettleArgs::try_parse_from(args.chain(extra.iter().copied())).unwrap()
    }

    #[test]
    fn test_simple_report() {
        let report = parse(&["--tariff=1,10"]).try_report().unwrap();
        assert_abs_diff_eq!(report.settlement.charge.0, 71.50, epsilon = 1e-9);
        assert!(report.message.contains("💵 *Valor da energia: R$ 71.50*"));
        assert_eq!(report.link, None);
    }

    #[test]
    fn test_property_tariff_applies_without_stay_tariff() {
        let report = parse(&["--generation-entry=500", "--generation-exit=620"])
            .try_report()
            .unwrap();
        assert_eq!(report.settlement.mode(), Mode::Monitoring);
        assert_abs_diff_eq!(report.settlement.charge.0, 116.25);
    }

    #[test]
    fn test_link() {
        let report = parse(&["--guest-phone=(11) 91234-5678"]).try_report().unwrap();
        let link = report.link.unwrap();
        let (base, text) = link.split_once("?text=").unwrap();
        assert_eq!(base, "https://wa.me/5511912345678");
        assert!(text.starts_with("%E2%9A%A1%20%2AOl%C3%A1%20Maria%21%2A%0A"));
    }

    #[test]
    fn test_unusable_phone_skips_link() {
        let report = parse(&["--guest-phone=n/a"]).try_report().unwrap();
        assert_eq!(report.guest.phone.as_deref(), Some("n/a"));
        assert_eq!(report.link, None);
    }

    #[test]
    fn test_owner_payment_key() {
        let report = parse(&["--owner-payment-key=host@pix"]).try_report().unwrap();
        assert!(report.message.contains("\nhost@pix\n"));

        let report = parse(&[
            "--owner-payment-key=host@pix",
            "--payment-key=stay@pix",
            "--payment-key-policy=owner-profile",
        ])
        .try_report()
        .unwrap();
        assert_eq!(report.guest.payment_key.as_deref(), Some("host@pix"));
    }

    #[test]
    fn test_validation_error() {
        let error = parse(&["--check-out=2023-12-31"]).try_report().unwrap_err();
        assert_eq!(error, ValidationError::InvalidDateRange);

        let error = parse(&["--grid-export-exit="]).try_report().unwrap_err();
        assert_eq!(error, ValidationError::MissingField(Field::GridExportExit));
    }

    #[test]
    fn test_invalid_property_tariff() {
        assert!(SettleArgs::try_parse_from(["settle", "--property-tariff=0"]).is_err());
    }
}
