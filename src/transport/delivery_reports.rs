use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{self, TransportError, VendorAccountIdJson};
use crate::domain::{
    CallbackUrl, CheckDeliveryReportsResponse, ConfirmDeliveryReports, DeliveryReport,
    DeliveryReportId, MessageId, MessageStatus, RawPhoneNumber,
};

#[derive(Debug, Serialize)]
struct ConfirmDeliveryReportsJsonRequest<'a> {
    delivery_report_ids: Vec<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
struct CheckDeliveryReportsJsonResponse {
    #[serde(default, deserialize_with = "common::null_as_default")]
    delivery_reports: Vec<DeliveryReportJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct DeliveryReportJson {
    delivery_report_id: String,
    message_id: String,
    status: String,
    source_number: Option<String>,
    date_received: Option<DateTime<Utc>>,
    submitted_date: Option<DateTime<Utc>>,
    delay: Option<u64>,
    original_text: Option<String>,
    vendor_account_id: Option<VendorAccountIdJson>,
    callback_url: Option<String>,
    metadata: Option<BTreeMap<String, String>>,
}

impl TryFrom<DeliveryReportJson> for DeliveryReport {
    type Error = TransportError;

    fn try_from(value: DeliveryReportJson) -> Result<Self, Self::Error> {
        Ok(Self {
            delivery_report_id: common::required(
                "delivery_report_id",
                value.delivery_report_id,
                DeliveryReportId::new,
            )?,
            message_id: common::required(MessageId::FIELD, value.message_id, MessageId::new)?,
            status: MessageStatus::from_wire(&value.status),
            source_number: common::optional(
                "source_number",
                value.source_number,
                RawPhoneNumber::new,
            )?,
            date_received: value.date_received,
            submitted_date: value.submitted_date,
            delay: value.delay,
            original_text: value.original_text,
            vendor_account_id: value.vendor_account_id.map(Into::into),
            callback_url: common::optional(
                CallbackUrl::FIELD,
                value.callback_url,
                CallbackUrl::new,
            )?,
            metadata: common::metadata(value.metadata),
        })
    }
}

pub fn encode_confirm_delivery_reports_body(
    request: &ConfirmDeliveryReports,
) -> Result<String, TransportError> {
    let body = ConfirmDeliveryReportsJsonRequest {
        delivery_report_ids: request.ids().iter().map(DeliveryReportId::as_str).collect(),
    };
    Ok(serde_json::to_string(&body)?)
}

pub fn decode_check_delivery_reports_response(
    json: &str,
) -> Result<CheckDeliveryReportsResponse, TransportError> {
    let parsed: CheckDeliveryReportsJsonResponse = serde_json::from_str(json)?;
    let delivery_reports = parsed
        .delivery_reports
        .into_iter()
        .map(DeliveryReport::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CheckDeliveryReportsResponse { delivery_reports })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn encode_confirm_body_lists_ids_in_order() {
        let request = ConfirmDeliveryReports::new(vec![
            DeliveryReportId::new("011dcead-6988-4ad6-a1c7-6b6c68ea628d").unwrap(),
            DeliveryReportId::new("3487b3fa-6586-4979-a233-2d1b095c7718").unwrap(),
        ])
        .unwrap();

        assert_eq!(
            encode_confirm_delivery_reports_body(&request).unwrap(),
            r#"{"delivery_report_ids":["011dcead-6988-4ad6-a1c7-6b6c68ea628d","3487b3fa-6586-4979-a233-2d1b095c7718"]}"#
        );
    }

    #[test]
    fn decode_maps_every_report_field() {
        let json = r#"
        {
          "delivery_reports": [
            {
              "callback_url": "https://my.callback.url.com",
              "delivery_report_id": "01e1fa0a-6e27-4945-9cdb-18644b4de043",
              "source_number": "+61491570157",
              "date_received": "2017-05-20T06:30:37.642Z",
              "status": "enroute",
              "delay": 0,
              "submitted_date": "2017-05-20T06:30:37.639Z",
              "original_text": "My first message!",
              "message_id": "d781dcab-d9d8-4fb2-9e03-872f07ae94ba",
              "vendor_account_id": {
                "vendor_id": "MessageMedia",
                "account_id": "MyAccount"
              },
              "metadata": {
                "key1": "value1",
                "key2": "value2"
              }
            },
            {
              "delivery_report_id": "0edf9022-7ccc-43e6-acab-480e93e98c1b",
              "message_id": "fbb3b3f5-b702-4d8b-ab44-65b2ee39a281",
              "status": "delivered"
            }
          ]
        }
        "#;

        let response = decode_check_delivery_reports_response(json).unwrap();
        assert_eq!(response.delivery_reports.len(), 2);

        let first = &response.delivery_reports[0];
        assert_eq!(
            first.delivery_report_id.as_str(),
            "01e1fa0a-6e27-4945-9cdb-18644b4de043"
        );
        assert_eq!(
            first.message_id.as_str(),
            "d781dcab-d9d8-4fb2-9e03-872f07ae94ba"
        );
        assert_eq!(first.status, MessageStatus::Enroute);
        assert_eq!(
            first.source_number.as_ref().map(RawPhoneNumber::raw),
            Some("+61491570157")
        );
        assert_eq!(
            first.date_received,
            Some(
                Utc.with_ymd_and_hms(2017, 5, 20, 6, 30, 37).unwrap()
                    + chrono::Duration::milliseconds(642)
            )
        );
        assert_eq!(first.delay, Some(0));
        assert_eq!(first.original_text.as_deref(), Some("My first message!"));
        let vendor = first.vendor_account_id.as_ref().unwrap();
        assert_eq!(vendor.vendor_id, "MessageMedia");
        assert_eq!(vendor.account_id, "MyAccount");
        assert_eq!(first.metadata.len(), 2);
        assert_eq!(
            first.callback_url.as_ref().map(|url| url.as_url().host_str()),
            Some(Some("my.callback.url.com"))
        );

        let second = &response.delivery_reports[1];
        assert_eq!(second.status, MessageStatus::Delivered);
        assert!(second.metadata.is_empty());
        assert_eq!(second.vendor_account_id, None);

        assert_eq!(
            response
                .ids()
                .iter()
                .map(DeliveryReportId::as_str)
                .collect::<Vec<_>>(),
            vec![
                "01e1fa0a-6e27-4945-9cdb-18644b4de043",
                "0edf9022-7ccc-43e6-acab-480e93e98c1b"
            ]
        );
    }

    #[test]
    fn decode_empty_batch() {
        let response = decode_check_delivery_reports_response(r#"{"delivery_reports": []}"#)
            .unwrap();
        assert!(response.delivery_reports.is_empty());

        let response = decode_check_delivery_reports_response("{}").unwrap();
        assert!(response.delivery_reports.is_empty());

        let response =
            decode_check_delivery_reports_response(r#"{"delivery_reports": null}"#).unwrap();
        assert!(response.delivery_reports.is_empty());
    }

    #[test]
    fn decode_rejects_blank_report_id() {
        let json = r#"
        {
          "delivery_reports": [
            { "delivery_report_id": " ", "message_id": "m", "status": "enroute" }
          ]
        }
        "#;
        let err = decode_check_delivery_reports_response(json).unwrap_err();
        assert!(matches!(
            err,
            TransportError::InvalidField {
                field: "delivery_report_id",
                ..
            }
        ));
    }

    #[test]
    fn decode_reports_invalid_json() {
        let err = decode_check_delivery_reports_response("{ not json }").unwrap_err();
        assert!(matches!(err, TransportError::Json(_)));
    }
}
