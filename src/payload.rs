//! Payload string builders for common QR content types
//!
//! These produce the text handed to [`crate::encode_text`]; they know nothing
//! about symbols.

use crate::error::EncodeError;
use std::fmt;
use std::str::FromStr;

/// WiFi network authentication type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WifiSecurity {
    /// WPA/WPA2 personal
    #[default]
    Wpa,
    /// Legacy WEP
    Wep,
    /// Open network; any password is dropped
    NoPass,
}

impl WifiSecurity {
    /// Value of the `T:` field
    pub fn as_str(&self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::NoPass => "nopass",
        }
    }
}

impl fmt::Display for WifiSecurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WifiSecurity {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wpa" | "wpa2" | "wpa3" => Ok(WifiSecurity::Wpa),
            "wep" => Ok(WifiSecurity::Wep),
            "nopass" | "none" | "open" => Ok(WifiSecurity::NoPass),
            _ => Err(EncodeError::InvalidPayloadField(format!(
                "unknown WiFi security {s:?}"
            ))),
        }
    }
}

/// WiFi network credentials (`WIFI:` URI scheme)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WifiConfig {
    /// Network name (required)
    pub ssid: String,
    /// Passphrase, ignored for open networks
    pub password: String,
    /// Authentication type
    pub security: WifiSecurity,
    /// Network does not broadcast its SSID
    pub hidden: bool,
}

impl WifiConfig {
    /// `WIFI:T:<security>;S:<ssid>;[P:<password>;][H:true;];`
    ///
    /// Returns `None` when the SSID is blank. Fields are trimmed and
    /// `\ ; , : "` are backslash-escaped.
    pub fn to_payload(&self) -> Option<String> {
        let ssid = self.ssid.trim();
        if ssid.is_empty() {
            return None;
        }
        let mut out = format!("WIFI:T:{};S:{};", self.security, escape_wifi(ssid));
        let password = self.password.trim();
        if !password.is_empty() && self.security != WifiSecurity::NoPass {
            out.push_str(&format!("P:{};", escape_wifi(password)));
        }
        if self.hidden {
            out.push_str("H:true;");
        }
        out.push(';');
        Some(out)
    }
}

fn escape_wifi(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ',' | ':' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Contact card (vCard 3.0)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VCard {
    /// Formatted name (`FN`)
    pub name: String,
    /// Telephone (`TEL`)
    pub phone: String,
    /// Email address (`EMAIL`)
    pub email: String,
    /// Organization (`ORG`)
    pub organization: String,
    /// Street address, written as the street component of `ADR`
    pub address: String,
}

impl VCard {
    /// vCard 3.0 text with a line per non-empty field.
    ///
    /// Returns `None` unless at least one of name, phone or email is present.
    pub fn to_payload(&self) -> Option<String> {
        fn field(value: &str) -> Option<&str> {
            Some(value.trim()).filter(|v| !v.is_empty())
        }
        let (name, phone, email) = (field(&self.name), field(&self.phone), field(&self.email));
        if name.is_none() && phone.is_none() && email.is_none() {
            return None;
        }

        let mut lines = vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()];
        lines.extend(name.map(|v| format!("FN:{v}")));
        lines.extend(phone.map(|v| format!("TEL:{v}")));
        lines.extend(email.map(|v| format!("EMAIL:{v}")));
        lines.extend(field(&self.organization).map(|v| format!("ORG:{v}")));
        lines.extend(field(&self.address).map(|v| format!("ADR:;;{v};;;;")));
        lines.push("END:VCARD".to_string());
        Some(lines.join("\n"))
    }
}
