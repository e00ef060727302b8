//! Rendered copy for the two registration emails.
//!
//! The attendee confirmation doubles as the entry pass, so the copy carries
//! the event details verbatim. Both messages ship an HTML body styled for
//! dark-mode mail clients and a plain-text fallback.

use chrono::FixedOffset;

use crate::{config::Config, email::OutboundEmail, registration::Registration};

pub const EVENT_NAME: &str = "LICENCIA P";
pub const EVENT_DATE: &str = "7 de Marzo, 2026";
pub const EVENT_VENUE: &str = "Vía Argentina, Panamá";
pub const EVENT_ACCESS: &str = "Lista VIP · +18";
pub const EVENT_DRESS_CODE: &str = "Cyberpunk Sexy";

pub const CALENDAR_URL: &str = "https://calendar.google.com/calendar/render?action=TEMPLATE&text=LICENCIA+P&dates=20260307/20260308&details=Mi+acceso+est%C3%A1+confirmado.+Lugar%3A+V%C3%ADa+Argentina%2C+Panam%C3%A1&location=V%C3%ADa+Argentina%2C+Panam%C3%A1";
pub const WHATSAPP_URL: &str = "https://chat.whatsapp.com/Io8EZhVs2yYEZgVYLaRIQJ?mode=gi_t";

// Panama runs UTC-5 year round.
const PANAMA_OFFSET_SECS: i32 = -5 * 3600;

pub fn confirmation_email(config: &Config, registration: &Registration) -> OutboundEmail {
    OutboundEmail {
        from: config.from_address.clone(),
        to: registration.email.clone(),
        reply_to: Some(config.reply_to.clone()),
        subject: format!("Tu acceso a {EVENT_NAME} — {EVENT_DATE}"),
        html: confirmation_html(&registration.name),
        text: confirmation_text(&registration.name),
    }
}

pub fn admin_alert_email(config: &Config, registration: &Registration, total: u64) -> OutboundEmail {
    let registered_at = panama_timestamp(registration);

    OutboundEmail {
        from: config.from_address.clone(),
        to: config.admin_email.clone(),
        reply_to: None,
        subject: format!("Nuevo registro: {}", registration.name),
        html: admin_alert_html(&registration.name, &registration.email, &registered_at, total),
        text: admin_alert_text(&registration.name, &registration.email, &registered_at, total),
    }
}

fn panama_timestamp(registration: &Registration) -> String {
    let panama = FixedOffset::east_opt(PANAMA_OFFSET_SECS).unwrap();
    registration
        .created_at
        .with_timezone(&panama)
        .format("%d/%m/%Y %H:%M:%S")
        .to_string()
}

fn confirmation_text(name: &str) -> String {
    format!(
        "Hola {name},\n\n\
         Tu registro para {EVENT_NAME} ha sido confirmado.\n\n\
         Fecha: {EVENT_DATE}\n\
         Lugar: {EVENT_VENUE}\n\
         Dress Code: {EVENT_DRESS_CODE}\n\
         Acceso: {EVENT_ACCESS}\n\n\
         Guarda este correo, será tu pase de entrada. Los detalles exactos de \
         ubicación serán enviados próximos al evento.\n\n\
         {EVENT_NAME} · 7 MAR 2026 · PTY"
    )
}

fn confirmation_html(name: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="UTF-8">
<meta name="color-scheme" content="dark">
<title>{EVENT_NAME}</title>
</head>
<body style="margin:0;padding:0;background-color:#050505;" bgcolor="#050505">
<table width="100%" cellpadding="0" cellspacing="0" border="0" bgcolor="#050505">
  <tr>
    <td align="center" style="padding:40px 16px;">
      <table width="100%" cellpadding="0" cellspacing="0" border="0" style="max-width:520px;border:1px solid #0d3d3d;border-radius:16px;overflow:hidden;">
        <tr>
          <td align="center" bgcolor="#0d0820" style="padding:48px 32px 40px;border-bottom:1px solid #2a0040;">
            <p style="margin:0 0 12px;color:#00f3ff;font-size:10px;letter-spacing:.5em;text-transform:uppercase;">ABRINAY PRESENTS</p>
            <p style="margin:0 0 4px;font-size:52px;font-weight:900;color:#ffffff;letter-spacing:.05em;">{EVENT_NAME}</p>
            <span style="display:inline-block;margin-top:16px;background-color:#001a1a;border:1px solid #00f3ff;border-radius:100px;padding:5px 18px;color:#00f3ff;font-size:9px;letter-spacing:.35em;text-transform:uppercase;font-weight:700;">&#10003; ACCESO CONCEDIDO</span>
          </td>
        </tr>
        <tr>
          <td bgcolor="#0a0a0a" style="padding:36px 32px;">
            <table width="100%" cellpadding="0" cellspacing="0" border="0" style="border:1px solid #0d3d3d;border-radius:12px;margin-bottom:28px;">
              <tr>
                <td align="center" bgcolor="#050f0f" style="padding:24px;border-radius:12px;">
                  <p style="margin:0 0 6px;color:#444444;font-size:10px;letter-spacing:.4em;text-transform:uppercase;">Usuario verificado</p>
                  <p style="margin:0;color:#ffffff;font-size:22px;font-weight:700;letter-spacing:.05em;">{name}</p>
                </td>
              </tr>
            </table>
            <table width="100%" cellpadding="0" cellspacing="0" border="0">
              <tr>
                <td style="padding:13px 0;border-bottom:1px solid #1a1a1a;font-size:11px;color:#555555;text-transform:uppercase;letter-spacing:.12em;">Fecha</td>
                <td align="right" style="padding:13px 0;border-bottom:1px solid #1a1a1a;font-size:13px;color:#ffffff;font-weight:600;">{EVENT_DATE}</td>
              </tr>
              <tr>
                <td style="padding:13px 0;border-bottom:1px solid #1a1a1a;font-size:11px;color:#555555;text-transform:uppercase;letter-spacing:.12em;">Lugar</td>
                <td align="right" style="padding:13px 0;border-bottom:1px solid #1a1a1a;font-size:13px;color:#ffffff;font-weight:600;">{EVENT_VENUE}</td>
              </tr>
              <tr>
                <td style="padding:13px 0;font-size:11px;color:#555555;text-transform:uppercase;letter-spacing:.12em;">Acceso</td>
                <td align="right" style="padding:13px 0;font-size:13px;color:#ffffff;font-weight:600;">{EVENT_ACCESS}</td>
              </tr>
            </table>
            <table width="100%" cellpadding="0" cellspacing="0" border="0" style="margin-top:28px;">
              <tr>
                <td style="border-left:2px solid #ff00ff;padding:14px 16px;background-color:#0d050d;border-radius:0 8px 8px 0;">
                  <p style="margin:0;font-size:12px;color:#999999;line-height:1.7;">Guarda este correo — será tu pase de entrada. Más detalles de ubicación exacta serán enviados próximos al evento.</p>
                </td>
              </tr>
            </table>
            <table width="100%" cellpadding="0" cellspacing="0" border="0" style="margin-top:28px;">
              <tr>
                <td align="center" style="padding-bottom:12px;">
                  <a href="{CALENDAR_URL}" target="_blank" style="display:inline-block;background-color:#001a1a;border:1px solid #00f3ff;color:#00f3ff;font-size:11px;letter-spacing:.2em;padding:13px 28px;border-radius:100px;text-decoration:none;text-transform:uppercase;font-weight:700;">&#128197; Añadir al Calendario</a>
                </td>
              </tr>
              <tr>
                <td align="center">
                  <a href="{WHATSAPP_URL}" target="_blank" style="display:inline-block;background-color:#001a0d;border:1px solid #25d366;color:#25d366;font-size:11px;letter-spacing:.2em;padding:13px 28px;border-radius:100px;text-decoration:none;text-transform:uppercase;font-weight:700;">&#128172; Unirse al Grupo</a>
                </td>
              </tr>
            </table>
          </td>
        </tr>
        <tr>
          <td align="center" bgcolor="#050505" style="padding:24px 32px;border-top:1px solid #111111;">
            <p style="margin:0;color:#333333;font-size:11px;letter-spacing:.05em;">{EVENT_NAME} &nbsp;·&nbsp; 7 MAR 2026 &nbsp;·&nbsp; PTY</p>
          </td>
        </tr>
      </table>
    </td>
  </tr>
</table>
</body>
</html>"##
    )
}

fn admin_alert_text(name: &str, email: &str, registered_at: &str, total: u64) -> String {
    format!(
        "Nuevo registro en {EVENT_NAME}\n\n\
         Nombre: {name}\n\
         Email: {email}\n\
         Fecha: {registered_at}\n\n\
         Total registrados: {total}"
    )
}

fn admin_alert_html(name: &str, email: &str, registered_at: &str, total: u64) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="UTF-8">
<title>Nuevo Registro</title>
</head>
<body style="margin:0;padding:0;background-color:#050505;" bgcolor="#050505">
<table width="100%" cellpadding="0" cellspacing="0" border="0" bgcolor="#050505">
  <tr>
    <td align="center" style="padding:40px 16px;">
      <table width="100%" cellpadding="0" cellspacing="0" border="0" style="max-width:480px;border:1px solid #2a0040;border-radius:12px;overflow:hidden;">
        <tr>
          <td bgcolor="#0a0a0a" style="padding:24px 28px;border-bottom:1px solid #1a001a;">
            <p style="margin:0;font-size:11px;color:#bc13fe;letter-spacing:.4em;text-transform:uppercase;">{EVENT_NAME} — NUEVO REGISTRO</p>
          </td>
        </tr>
        <tr>
          <td bgcolor="#0d0d0d" style="padding:28px;">
            <table width="100%" cellpadding="0" cellspacing="0" border="0">
              <tr>
                <td style="padding:10px 0;border-bottom:1px solid #1a1a1a;font-size:11px;color:#555555;text-transform:uppercase;letter-spacing:.1em;">Nombre</td>
                <td align="right" style="padding:10px 0;border-bottom:1px solid #1a1a1a;font-size:13px;color:#ffffff;font-weight:600;">{name}</td>
              </tr>
              <tr>
                <td style="padding:10px 0;border-bottom:1px solid #1a1a1a;font-size:11px;color:#555555;text-transform:uppercase;letter-spacing:.1em;">Email</td>
                <td align="right" style="padding:10px 0;border-bottom:1px solid #1a1a1a;font-size:13px;color:#ffffff;font-weight:600;">{email}</td>
              </tr>
              <tr>
                <td style="padding:10px 0;font-size:11px;color:#555555;text-transform:uppercase;letter-spacing:.1em;">Fecha</td>
                <td align="right" style="padding:10px 0;font-size:13px;color:#ffffff;font-weight:600;">{registered_at}</td>
              </tr>
            </table>
            <p style="margin:20px 0 0;text-align:center;color:#555555;font-size:11px;letter-spacing:.2em;text-transform:uppercase;">Total registrados: {total}</p>
          </td>
        </tr>
      </table>
    </td>
  </tr>
</table>
</body>
</html>"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            port: 0,
            redis_url: String::new(),
            registrations_key: "registrations".to_string(),
            resend_api_key: "test".to_string(),
            resend_base_url: "http://localhost".to_string(),
            from_address: "LICENCIA P <noreply@bukoflow.com>".to_string(),
            reply_to: "abrinay1997@gmail.com".to_string(),
            admin_email: "admin@example.com".to_string(),
        }
    }

    fn ana() -> Registration {
        Registration::from_submission("Ana Díaz", "ana@example.com").unwrap()
    }

    #[test]
    fn confirmation_carries_event_details() {
        let email = confirmation_email(&test_config(), &ana());

        assert_eq!(email.to, "ana@example.com");
        assert_eq!(email.reply_to.as_deref(), Some("abrinay1997@gmail.com"));
        assert!(email.subject.contains(EVENT_NAME));
        for body in [&email.html, &email.text] {
            assert!(body.contains("Ana Díaz"));
            assert!(body.contains(EVENT_DATE));
            assert!(body.contains(EVENT_VENUE));
            assert!(body.contains(EVENT_ACCESS));
        }
        assert!(email.text.contains(EVENT_DRESS_CODE));
    }

    #[test]
    fn confirmation_html_links_calendar_and_whatsapp() {
        let email = confirmation_email(&test_config(), &ana());

        assert!(email.html.contains(CALENDAR_URL));
        assert!(email.html.contains(WHATSAPP_URL));
    }

    #[test]
    fn admin_alert_carries_registrant_and_total() {
        let config = test_config();
        let email = admin_alert_email(&config, &ana(), 42);

        assert_eq!(email.to, config.admin_email);
        assert_eq!(email.subject, "Nuevo registro: Ana Díaz");
        for body in [&email.html, &email.text] {
            assert!(body.contains("Ana Díaz"));
            assert!(body.contains("ana@example.com"));
            assert!(body.contains("Total registrados: 42"));
        }
    }
}
