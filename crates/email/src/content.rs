//! Shared email content and link builders
//!
//! Used by both production (SES) and mock email services, and by the
//! accounts API when it hands a link back directly.
//!
//! Names are user input: HTML bodies escape them, and subjects drop control
//! characters.

use html_escape::{encode_double_quoted_attribute, encode_text};

pub fn activation_url(app_base_url: &str, token: &str) -> String {
    format!("{}/v1/user/activate/{}", app_base_url, token)
}

pub fn password_reset_url(app_base_url: &str, token: &str) -> String {
    format!("{}/v1/user/password/reset/{}", app_base_url, token)
}

pub fn invite_url(app_base_url: &str, token: &str) -> String {
    format!("{}/v1/user/invite/{}", app_base_url, token)
}

/// Subject line for an invitation, with control characters replaced
pub fn invitation_subject(inviter_name: &str) -> String {
    let inviter: String = inviter_name
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    format!("{} invited you to Warden", inviter.trim())
}

/// Plain-text body for the welcome / activation email.
pub fn activation_text(name: &str, activation_url: &str) -> String {
    format!(
        "Hi {}!\n\n\
        Welcome aboard, we're glad to have you.\n\n\
        Please confirm your email address to activate your account:\n\
        {}\n\n\
        This link will expire in 24 hours.\n\n\
        Thanks,\n\
        The Warden Team",
        name, activation_url
    )
}

pub fn activation_html(name: &str, activation_url: &str) -> String {
    format!(
        r#"
            <html>
            <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
                <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
                    <h2 style="color: #007cba;">Welcome, {name}!</h2>

                    <p>We're glad to have you. Please confirm your email address to activate your account.</p>

                    <div style="text-align: center; margin: 30px 0;">
                        <a href="{activation_url}"
                           style="background-color: #007cba; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px; display: inline-block; font-weight: bold;">
                            Activate Account
                        </a>
                    </div>

                    <p>Or copy and paste this link in your browser:</p>
                    <p style="background-color: #f5f5f5; padding: 10px; border-radius: 4px; word-break: break-all;">
                        <a href="{activation_url}">{activation_url}</a>
                    </p>

                    <p style="color: #666; font-size: 14px;">
                        <em>This link will expire in 24 hours.</em>
                    </p>
                </div>
            </body>
            </html>
            "#,
        name = encode_text(name),
        activation_url = encode_double_quoted_attribute(activation_url)
    )
}

pub fn password_reset_text(name: &str, reset_url: &str) -> String {
    format!(
        "Hi {}!\n\n\
        We received a request to reset your password.\n\n\
        Use the link below to choose a new one:\n\
        {}\n\n\
        This link will expire in 3 hours. If you didn't ask for a reset, \
        you can ignore this email.\n\n\
        Thanks,\n\
        The Warden Team",
        name, reset_url
    )
}

pub fn password_reset_html(name: &str, reset_url: &str) -> String {
    format!(
        r#"
            <html>
            <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
                <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
                    <h2 style="color: #007cba;">Reset your password</h2>

                    <p>Hi {name}, we received a request to reset your password.</p>

                    <div style="text-align: center; margin: 30px 0;">
                        <a href="{reset_url}"
                           style="background-color: #007cba; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px; display: inline-block; font-weight: bold;">
                            Choose a new password
                        </a>
                    </div>

                    <p style="color: #666; font-size: 14px;">
                        <em>This link will expire in 3 hours. If you didn't ask for a reset, you can ignore this email.</em>
                    </p>
                </div>
            </body>
            </html>
            "#,
        name = encode_text(name),
        reset_url = encode_double_quoted_attribute(reset_url)
    )
}

pub fn invitation_text(inviter_name: &str, invite_url: &str) -> String {
    format!(
        "Hi there!\n\n\
        {} has invited you to join Warden.\n\n\
        Click the link below to create your account:\n\
        {}\n\n\
        This invitation will expire in 24 hours.\n\n\
        Thanks,\n\
        The Warden Team",
        inviter_name, invite_url
    )
}

pub fn invitation_html(inviter_name: &str, invite_url: &str) -> String {
    format!(
        r#"
            <html>
            <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
                <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
                    <h2 style="color: #007cba;">You're invited!</h2>

                    <p><strong>{inviter_name}</strong> has invited you to join Warden.</p>

                    <div style="text-align: center; margin: 30px 0;">
                        <a href="{invite_url}"
                           style="background-color: #007cba; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px; display: inline-block; font-weight: bold;">
                            Accept Invitation
                        </a>
                    </div>

                    <p style="color: #666; font-size: 14px;">
                        <em>This invitation will expire in 24 hours.</em>
                    </p>
                </div>
            </body>
            </html>
            "#,
        inviter_name = encode_text(inviter_name),
        invite_url = encode_double_quoted_attribute(invite_url)
    )
}
