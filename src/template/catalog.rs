//! Built-in email templates of the placement platform

use super::types::TemplateRecord;

/// Template used by company email campaigns when the request names none.
pub const COMPANY_CAMPAIGN: &str = "companyCampaign";

const FOOTER_TEXT: &str = "\n\n--\nBolsa de Trabajo Universitaria\nEste es un mensaje automático, por favor no responda a este correo.";

const FOOTER_HTML: &str = r#"<hr><p style="font-size:12px;color:#777">Bolsa de Trabajo Universitaria. Este es un mensaje automático, por favor no responda a este correo.</p>"#;

fn record(name: &str, subject: &str, text: &str, html: &str) -> TemplateRecord {
    TemplateRecord::new(
        name,
        subject,
        format!("{}{}", text, FOOTER_TEXT),
        format!("<div>{}{}</div>", html, FOOTER_HTML),
    )
}

/// All templates shipped with the service.
pub fn builtin_templates() -> Vec<TemplateRecord> {
    vec![
        record(
            "welcome",
            "Bienvenido a la Bolsa de Trabajo, {{userName}}",
            "Bienvenido {{userName}}\n\nTu cuenta ha sido creada correctamente. Ya puedes ingresar a la plataforma con tu correo {{email}}.",
            r#"<h1>Bienvenido {{userName}}</h1>
<p>Tu cuenta ha sido creada correctamente. Ya puedes ingresar a la plataforma con tu correo <strong>{{email}}</strong>.</p>
{{#if loginUrl}}<p><a href="{{loginUrl}}">Ingresar</a></p>{{/if}}"#,
        ),
        record(
            "companyApproval",
            "Su empresa {{companyName}} ha sido aprobada",
            "Estimado/a {{contactName}}:\n\nNos complace informarle que la empresa {{companyName}} ha sido aprobada en la Bolsa de Trabajo. Ya puede publicar ofertas laborales.",
            r#"<h2>Empresa aprobada</h2>
<p>Estimado/a {{contactName}}:</p>
<p>Nos complace informarle que la empresa <strong>{{companyName}}</strong> ha sido aprobada en la Bolsa de Trabajo. Ya puede publicar ofertas laborales.</p>
{{#if comments}}<div class="comments"><p><strong>Comentarios del coordinador:</strong></p><p>{{comments}}</p></div>{{/if}}
{{#if loginUrl}}<p><a href="{{loginUrl}}">Ir a la plataforma</a></p>{{/if}}"#,
        ),
        record(
            "companyRejection",
            "Resultado de la revisión de {{companyName}}",
            "Estimado/a {{contactName}}:\n\nLamentamos informarle que el registro de la empresa {{companyName}} no ha sido aprobado.",
            r#"<h2>Registro no aprobado</h2>
<p>Estimado/a {{contactName}}:</p>
<p>Lamentamos informarle que el registro de la empresa <strong>{{companyName}}</strong> no ha sido aprobado.</p>
{{#if comments}}<div class="comments"><p><strong>Motivo:</strong></p><p>{{comments}}</p></div>{{/if}}
<p>Puede actualizar su información y solicitar una nueva revisión.</p>"#,
        ),
        record(
            "passwordReset",
            "Restablecer contraseña",
            "Hola {{userName}}:\n\nRecibimos una solicitud para restablecer tu contraseña. Usa el siguiente enlace: {{resetUrl}}\nEl enlace vence en {{expiresIn}}.",
            r#"<p>Hola {{userName}}:</p>
<p>Recibimos una solicitud para restablecer tu contraseña.</p>
<p><a href="{{resetUrl}}">Restablecer contraseña</a></p>
<p>El enlace vence en {{expiresIn}}. Si no solicitaste el cambio, ignora este mensaje.</p>"#,
        ),
        record(
            "applicationReceived",
            "Nueva postulación para {{jobTitle}}",
            "Estimado/a {{contactName}}:\n\n{{studentName}} se ha postulado a la oferta {{jobTitle}}.",
            r#"<p>Estimado/a {{contactName}}:</p>
<p><strong>{{studentName}}</strong> se ha postulado a la oferta <strong>{{jobTitle}}</strong>.</p>
{{#if applicationUrl}}<p><a href="{{applicationUrl}}">Ver postulación</a></p>{{/if}}"#,
        ),
        record(
            "applicationStatusUpdate",
            "Actualización de tu postulación a {{jobTitle}}",
            "Hola {{studentName}}:\n\nTu postulación a {{jobTitle}} en {{companyName}} cambió de estado: {{status}}.",
            r#"<p>Hola {{studentName}}:</p>
<p>Tu postulación a <strong>{{jobTitle}}</strong> en {{companyName}} cambió de estado: <strong>{{status}}</strong>.</p>
{{#if comments}}<p><strong>Comentarios:</strong> {{comments}}</p>{{/if}}"#,
        ),
        record(
            "newJobPosting",
            "Nueva oferta: {{jobTitle}} en {{companyName}}",
            "Hola {{studentName}}:\n\n{{companyName}} publicó la oferta {{jobTitle}}. Consulta los detalles en {{jobUrl}}",
            r#"<p>Hola {{studentName}}:</p>
<p><strong>{{companyName}}</strong> publicó la oferta <strong>{{jobTitle}}</strong>.</p>
{{#if location}}<p>Ubicación: {{location}}</p>{{/if}}
{{#if deadline}}<p>Fecha límite de postulación: {{deadline}}</p>{{/if}}
<p><a href="{{jobUrl}}">Ver oferta</a></p>"#,
        ),
        record(
            "eventReminder",
            "Recordatorio: {{eventName}}",
            "Hola {{userName}}:\n\nTe recordamos el evento {{eventName}} el {{eventDate}}.",
            r#"<p>Hola {{userName}}:</p>
<p>Te recordamos el evento <strong>{{eventName}}</strong> el {{eventDate}}.</p>
{{#if eventLocation}}<p>Lugar: {{eventLocation}}</p>{{/if}}"#,
        ),
        record(
            "surveyInvitation",
            "Te invitamos a responder: {{surveyTitle}}",
            "Hola {{userName}}:\n\nTu opinión es importante. Responde la encuesta {{surveyTitle}} en {{surveyUrl}}",
            r#"<p>Hola {{userName}}:</p>
<p>Tu opinión es importante. Responde la encuesta <strong>{{surveyTitle}}</strong>.</p>
{{#if deadline}}<p>Disponible hasta: {{deadline}}</p>{{/if}}
<p><a href="{{surveyUrl}}">Responder encuesta</a></p>"#,
        ),
        record(
            COMPANY_CAMPAIGN,
            "{{subject}}",
            "{{contactName}}:\n\n{{message}}",
            r#"<p>{{contactName}}:</p>
<p>{{message}}</p>
{{#if ctaUrl}}<p><a href="{{ctaUrl}}">{{ctaText}}</a></p>{{/if}}
<p style="font-size:12px;color:#777">Enviado a {{companyName}} ({{email}})</p>"#,
        ),
    ]
}
