//! Per-year CSP reports: committee, members, online sales and ledger lines.
//!
//! Every report takes a centre code and an academic year label such as
//! `"14-15"` (see [`date_to_year`](crate::year::date_to_year)).

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::ApiError;
use crate::lenient::null_as_default;
use crate::money::Money;
use crate::time::Time;
use crate::transport::Transport;

/// One post-holder on a CSP committee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommitteeMember {
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub surname: String,
    #[serde(rename = "CID", default, deserialize_with = "null_as_default")]
    pub cid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub login: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub post_name: String,
    #[serde(rename = "PhoneNo", default, deserialize_with = "null_as_default")]
    pub phone_no: String,
    pub start_date: Time,
    pub end_date: Time,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Member {
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub surname: String,
    #[serde(rename = "CID", default, deserialize_with = "null_as_default")]
    pub cid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub login: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_no: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub member_type: String,
}

/// Who bought an online sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub surname: String,
    #[serde(rename = "CID", default, deserialize_with = "null_as_default")]
    pub cid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub login: String,
}

/// VAT treatment of a product line. `rate` is a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vat {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub rate: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OnlineSale {
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_number: String,
    pub sale_date_time: Time,
    #[serde(rename = "ProductID", default, deserialize_with = "null_as_default")]
    pub product_id: u64,
    #[serde(rename = "ProductLineID", default, deserialize_with = "null_as_default")]
    pub product_line_id: u64,
    pub price: Money,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity_collected: u32,
    pub customer: Customer,
    #[serde(rename = "VAT")]
    pub vat: Vat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Funding {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Activity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Ledger account; `account_type` is e.g. `"Income"` or `"Expenditure"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "Type", default, deserialize_with = "null_as_default")]
    pub account_type: String,
}

/// A single line in a CSP's accounts. Spending is negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionLine {
    #[serde(rename = "TransID", default, deserialize_with = "null_as_default")]
    pub trans_id: u64,
    pub trans_date: Time,
    #[serde(default, deserialize_with = "null_as_default")]
    pub document: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub amount: Money,
    pub funding: Funding,
    pub activity: Activity,
    pub account: Account,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pending: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outstanding: bool,
}

fn report_path(centre: &str, report: &str, year: &str) -> String {
    format!("/CSP/{centre}/reports/{report}?year={year}")
}

impl<T: Transport> Client<T> {
    pub fn committee(&self, centre: &str, year: &str) -> Result<Vec<CommitteeMember>, ApiError> {
        self.fetch(&report_path(centre, "committee", year))
    }

    pub fn members(&self, centre: &str, year: &str) -> Result<Vec<Member>, ApiError> {
        self.fetch(&report_path(centre, "members", year))
    }

    pub fn online_sales(&self, centre: &str, year: &str) -> Result<Vec<OnlineSale>, ApiError> {
        self.fetch(&report_path(centre, "onlinesales", year))
    }

    pub fn transaction_lines(
        &self,
        centre: &str,
        year: &str,
    ) -> Result<Vec<TransactionLine>, ApiError> {
        self.fetch(&report_path(centre, "transactionlines", year))
    }
}
