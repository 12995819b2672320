//! HTML fragments for the results panel, the case modal and the region filter.
//!
//! Every interpolated value is escaped; record fields come from user-submitted
//! reports and must not be able to inject markup into the page.

use std::fmt::Write;

use crate::constants::{
    CASE_DETAILS_BUTTON_CLASS, REPORT_SIGHTING_BUTTON_CLASS, REPORT_SIGHTING_MODAL_BUTTON_CLASS,
};
use crate::models::PersonRecord;

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A single paragraph, used for the prompt, empty and error states of the results panel.
pub fn render_message(message: &str) -> String {
    format!("<p>{}</p>", escape_html(message))
}

/// The results grid: one `case-card` per record, in response order.
///
/// Callers render the "no matches" message instead when `records` is empty.
pub fn render_case_cards(records: &[PersonRecord]) -> String {
    let mut html = String::from("<div class=\"cases-grid\">");
    for person in records {
        let id = escape_html(person.id.as_str());
        let name = escape_html(&person.name);
        // Writing into a String cannot fail.
        let _ = write!(
            html,
            "<div class=\"case-card\">\
             <div class=\"case-image\"><img src=\"{photo}\" alt=\"{name}\"></div>\
             <div class=\"case-info\">\
             <h3>{name}</h3>\
             <p><strong>Age:</strong> {age}</p>\
             <p><strong>Last Seen:</strong> {last_seen}</p>\
             <p><strong>Date:</strong> {date}</p>\
             <button class=\"{details_class}\" data-person-id=\"{id}\">View Details</button>\
             <button class=\"{sighting_class}\" data-person-id=\"{id}\">Report Sighting</button>\
             </div>\
             </div>",
            photo = escape_html(&person.photo_url),
            age = escape_html(&person.age),
            last_seen = escape_html(&person.last_seen),
            date = escape_html(&person.last_seen_date),
            details_class = CASE_DETAILS_BUTTON_CLASS,
            sighting_class = REPORT_SIGHTING_BUTTON_CLASS,
        );
    }
    html.push_str("</div>");
    html
}

/// Content of `modalContent` for a single case, including the contact block and
/// the in-modal "Report Sighting" button.
pub fn render_case_details(person: &PersonRecord) -> String {
    let name = escape_html(&person.name);
    format!(
        "<h2>{name}</h2>\
         <div class=\"case-details\">\
         <div class=\"detail-image\"><img src=\"{photo}\" alt=\"{name}\"></div>\
         <div class=\"detail-info\">\
         <p><strong>Age:</strong> {age}</p>\
         <p><strong>Gender:</strong> {gender}</p>\
         <p><strong>Last Seen:</strong> {last_seen}</p>\
         <p><strong>Last Seen Date:</strong> {last_seen_date}</p>\
         <p><strong>Region:</strong> {region}</p>\
         <p><strong>Description:</strong> {description}</p>\
         <div class=\"contact-info\">\
         <h3>Contact Information</h3>\
         <p><strong>Contact:</strong> {contact_name}</p>\
         <p><strong>Phone:</strong> {contact_phone}</p>\
         <p><strong>Email:</strong> {contact_email}</p>\
         </div>\
         <button class=\"btn btn-primary {button_class}\" data-person-id=\"{id}\">Report Sighting</button>\
         </div>\
         </div>",
        photo = escape_html(&person.photo_url),
        age = escape_html(&person.age),
        gender = escape_html(&person.gender),
        last_seen = escape_html(&person.last_seen),
        last_seen_date = escape_html(&person.last_seen_date),
        region = escape_html(&person.region),
        description = escape_html(&person.description),
        contact_name = escape_html(&person.contact_name),
        contact_phone = escape_html(&person.contact_phone),
        contact_email = escape_html(&person.contact_email),
        button_class = REPORT_SIGHTING_MODAL_BUTTON_CLASS,
        id = escape_html(person.id.as_str()),
    )
}

/// `<option>` list for `regionFilter`, led by the "All Regions" entry.
pub fn render_region_options(regions: &[String], selected: &str) -> String {
    let mut html = String::from("<option value=\"\">All Regions</option>");
    for region in regions {
        let value = escape_html(region);
        let marker = if region == selected { " selected" } else { "" };
        let _ = write!(html, "<option value=\"{value}\"{marker}>{value}</option>");
    }
    html
}
