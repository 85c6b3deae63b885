use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

/// One menu object from the JSON menu export. Field names in the export are
/// camelCase; the `HHmm` variants do not follow the usual casing and carry
/// explicit renames.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    pub guid: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub id_string: String,
    pub orderable_online: bool,
    #[serde(default)]
    pub orderable_online_status: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(default, rename = "startTimeHHmm")]
    pub start_time_hhmm: Option<String>,
    #[serde(default, rename = "endTimeHHmm")]
    pub end_time_hhmm: Option<String>,
    #[serde(default)]
    pub start_time_local_standard_time: Option<i64>,
    #[serde(default)]
    pub end_time_local_standard_time: Option<i64>,
    #[serde(default, rename = "startTimeHHmmLocalStandardTime")]
    pub start_time_hhmm_local_standard_time: Option<String>,
    #[serde(default, rename = "endTimeHHmmLocalStandardTime")]
    pub end_time_hhmm_local_standard_time: Option<String>,
    pub available_all_times: bool,
    pub available_all_days: bool,
    #[serde(default)]
    pub days_available_bits: Option<i16>,
    #[serde(default)]
    pub days_available_string: Option<Vec<String>>,
}

/// One row of the orders export. The `Checks` field keeps its raw
/// comma-separated form; cross-referencing against the checks export is the
/// orders loader's job, not a parsing concern.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRow {
    #[serde(rename = "Order Id")]
    pub order_id: i64,
    #[serde(rename = "Order #")]
    pub order_number: i64,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Server")]
    pub server: Option<String>,
    #[serde(rename = "Opened", deserialize_with = "de::mdy_datetime")]
    pub opened_at: NaiveDateTime,
    #[serde(rename = "Closed", deserialize_with = "de::opt_mdy_datetime")]
    pub closed_at: Option<NaiveDateTime>,
    #[serde(rename = "Paid", deserialize_with = "de::opt_mdy_datetime")]
    pub paid_at: Option<NaiveDateTime>,
    #[serde(rename = "# of Guests")]
    pub guest_count: Option<i32>,
    #[serde(rename = "Tab Names")]
    pub tab_names: Option<String>,
    #[serde(rename = "Table")]
    pub table_number: Option<String>,
    #[serde(rename = "Revenue Center")]
    pub revenue_center: Option<String>,
    #[serde(rename = "Dining Area")]
    pub dining_area: Option<String>,
    #[serde(rename = "Service")]
    pub service_period: Option<String>,
    #[serde(rename = "Dining Options")]
    pub dining_option: Option<String>,
    #[serde(rename = "Discount Amount")]
    pub discount_amount: Option<Decimal>,
    #[serde(rename = "Amount")]
    pub subtotal: Option<Decimal>,
    #[serde(rename = "Tax")]
    pub tax: Option<Decimal>,
    #[serde(rename = "Tip")]
    pub tip: Option<Decimal>,
    #[serde(rename = "Gratuity")]
    pub gratuity: Option<Decimal>,
    #[serde(rename = "Total")]
    pub total: Option<Decimal>,
    #[serde(rename = "Voided", deserialize_with = "de::yes_no_bool")]
    pub is_voided: bool,
    #[serde(rename = "Duration (Opened to Paid)")]
    pub duration: Option<String>,
    #[serde(rename = "Checks")]
    pub checks: Option<String>,
    #[serde(rename = "Order Source")]
    pub order_source: Option<String>,
}

/// One row of the checks export.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckRow {
    #[serde(rename = "Check Id")]
    pub check_id: i64,
    #[serde(rename = "Check #")]
    pub check_number: i64,
    #[serde(rename = "Customer Id")]
    pub customer_id: Option<i64>,
    #[serde(rename = "Customer")]
    pub customer_name: Option<String>,
    #[serde(rename = "Customer Phone")]
    pub customer_phone: Option<String>,
    #[serde(rename = "Customer Email")]
    pub customer_email: Option<String>,
    #[serde(rename = "Customer Family")]
    pub customer_family: Option<String>,
    #[serde(rename = "Location Code")]
    pub location_code: Option<String>,
    #[serde(rename = "Opened Date", deserialize_with = "de::opt_mdy_date")]
    pub opened_date: Option<NaiveDate>,
    #[serde(rename = "Opened Time", deserialize_with = "de::opt_hm_time")]
    pub opened_time: Option<NaiveTime>,
    #[serde(rename = "Item Description")]
    pub item_description: Option<String>,
    #[serde(rename = "Table Size")]
    pub table_size: Option<i32>,
    #[serde(rename = "Discount")]
    pub discount: Option<Decimal>,
    #[serde(rename = "Reason of Discount")]
    pub discount_reason: Option<String>,
    #[serde(rename = "Tax")]
    pub tax: Option<Decimal>,
    #[serde(rename = "Tender")]
    pub tender: Option<String>,
    #[serde(rename = "Total")]
    pub total: Option<Decimal>,
    #[serde(rename = "Link")]
    pub receipt_link: Option<String>,
}

/// One row of the time-clock export. Carries the full employee and job
/// identity used by the dimension resolver.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeEntryRow {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Location Code")]
    pub location_code: Option<String>,
    #[serde(rename = "Id")]
    pub entry_id: i64,
    #[serde(rename = "GUID")]
    pub entry_guid: Uuid,
    #[serde(rename = "Employee Id")]
    pub employee_id: i64,
    #[serde(rename = "Employee GUID")]
    pub employee_guid: Uuid,
    #[serde(rename = "Employee External Id")]
    pub employee_external_id: Option<String>,
    #[serde(rename = "Employee")]
    pub employee_name: String,
    #[serde(rename = "Job Id")]
    pub job_id: i64,
    #[serde(rename = "Job GUID")]
    pub job_guid: Uuid,
    #[serde(rename = "Job Code")]
    pub job_code: Option<String>,
    #[serde(rename = "Job Title")]
    pub job_title: String,
    #[serde(rename = "In Date", deserialize_with = "de::mdy_datetime")]
    pub in_date: NaiveDateTime,
    #[serde(rename = "Out Date", deserialize_with = "de::mdy_datetime")]
    pub out_date: NaiveDateTime,
    #[serde(rename = "Auto Clock-out", deserialize_with = "de::yes_no_bool")]
    pub auto_clock_out: bool,
    #[serde(rename = "Total Hours")]
    pub total_hours: Decimal,
    #[serde(rename = "Unpaid Break Time")]
    pub unpaid_break_time: Option<Decimal>,
    #[serde(rename = "Paid Break Time")]
    pub paid_break_time: Option<Decimal>,
    #[serde(rename = "Payable Hours")]
    pub payable_hours: Decimal,
    #[serde(rename = "Cash Tips Declared")]
    pub cash_tips_declared: Option<Decimal>,
    #[serde(rename = "Non Cash Tips")]
    pub non_cash_tips: Option<Decimal>,
    #[serde(rename = "Total Gratuity")]
    pub total_gratuity: Option<Decimal>,
    #[serde(rename = "Total Tips")]
    pub total_tips: Option<Decimal>,
    #[serde(rename = "Tips Withheld")]
    pub tips_withheld: Option<Decimal>,
    #[serde(rename = "Wage")]
    pub wage: Decimal,
    #[serde(rename = "Regular Hours")]
    pub regular_hours: Option<Decimal>,
    #[serde(rename = "Overtime Hours")]
    pub overtime_hours: Option<Decimal>,
    #[serde(rename = "Regular Pay")]
    pub regular_pay: Option<Decimal>,
    #[serde(rename = "Overtime Pay")]
    pub overtime_pay: Option<Decimal>,
    #[serde(rename = "Total Pay")]
    pub total_pay: Decimal,
}

/// Deserialization helpers for the report-format conventions the exports
/// use: `m/d/yy h:mm AM/PM` timestamps and `Yes`/`No` booleans.
pub(crate) mod de {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    const DATETIME_FORMAT: &str = "%m/%d/%y %I:%M %p";
    const DATE_FORMAT: &str = "%m/%d/%y";
    const TIME_FORMAT: &str = "%I:%M %p";

    pub fn mdy_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), DATETIME_FORMAT)
            .map_err(|err| D::Error::custom(format!("invalid timestamp '{raw}': {err}")))
    }

    pub fn opt_mdy_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match non_empty(deserializer)? {
            Some(raw) => NaiveDateTime::parse_from_str(raw.trim(), DATETIME_FORMAT)
                .map(Some)
                .map_err(|err| D::Error::custom(format!("invalid timestamp '{raw}': {err}"))),
            None => Ok(None),
        }
    }

    pub fn opt_mdy_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match non_empty(deserializer)? {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
                .map(Some)
                .map_err(|err| D::Error::custom(format!("invalid date '{raw}': {err}"))),
            None => Ok(None),
        }
    }

    pub fn opt_hm_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match non_empty(deserializer)? {
            Some(raw) => NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT)
                .map(Some)
                .map_err(|err| D::Error::custom(format!("invalid time '{raw}': {err}"))),
            None => Ok(None),
        }
    }

    pub fn yes_no_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" => Ok(true),
            "no" | "false" | "" => Ok(false),
            other => Err(D::Error::custom(format!("expected Yes/No, got '{other}'"))),
        }
    }

    fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.filter(|raw| !raw.trim().is_empty()))
    }
}
