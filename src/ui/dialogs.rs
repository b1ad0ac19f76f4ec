use gtk4::gio;
use gtk4::prelude::*;
use gtk4::{ApplicationWindow, Dialog, Label, ResponseType};

use crate::i18n::I18n;

fn add_dialog_button(dialog: &Dialog, label: &str, response: ResponseType) {
    let btn = dialog.add_button(label, response);
    btn.set_margin_start(8);
    btn.set_margin_end(8);
    btn.set_margin_top(6);
    btn.set_margin_bottom(6);
}

fn pad_content(dialog: &Dialog) -> gtk4::Box {
    let content = dialog.content_area();
    content.set_margin_start(16);
    content.set_margin_end(16);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content
}

/// Confirm abandoning the match in progress before restarting.
pub fn confirm_restart(parent: &ApplicationWindow, i18n: &I18n, on_confirm: impl Fn() + 'static) {
    let dialog = Dialog::new();
    dialog.set_transient_for(Some(parent));
    dialog.set_modal(true);
    dialog.set_destroy_with_parent(true);
    dialog.set_title(Some(&i18n.t("restart-confirm-title")));
    add_dialog_button(&dialog, &i18n.t("ok"), ResponseType::Accept);
    add_dialog_button(&dialog, &i18n.t("cancel"), ResponseType::Cancel);

    let content = pad_content(&dialog);
    let label = Label::new(Some(&i18n.t("restart-confirm-message")));
    label.set_wrap(true);
    content.append(&label);

    dialog.connect_response(move |dialog, response| {
        if response == ResponseType::Accept {
            on_confirm();
        }
        dialog.close();
    });

    dialog.show();
}

/// Show a simple info message box. The body may contain markup links.
pub fn show_info(parent: &ApplicationWindow, title: &str, message: &str, i18n: &I18n) {
    let dialog = Dialog::new();
    dialog.set_transient_for(Some(parent));
    dialog.set_modal(true);
    dialog.set_destroy_with_parent(true);
    dialog.set_title(Some(title));
    add_dialog_button(&dialog, &i18n.t("ok"), ResponseType::Accept);

    let content = pad_content(&dialog);
    let label = Label::new(None);
    label.set_wrap(true);
    label.set_use_markup(true);
    label.set_markup(message);
    label.connect_activate_link(|_, uri| {
        if let Err(e) = gio::AppInfo::launch_default_for_uri(uri, None::<&gio::AppLaunchContext>) {
            eprintln!("Failed to open link {}: {}", uri, e);
            return gtk4::Inhibit(false);
        }
        gtk4::Inhibit(true)
    });
    content.append(&label);

    dialog.connect_response(|dialog, _| {
        dialog.close();
    });

    dialog.show();
}

/// Show a "quit while a match is running?" confirmation. The caller
/// connects to the response signal.
pub fn confirm_close(parent: &ApplicationWindow, i18n: &I18n) -> Dialog {
    let dialog = Dialog::new();
    dialog.set_transient_for(Some(parent));
    dialog.set_modal(true);
    dialog.set_destroy_with_parent(true);
    dialog.set_title(Some(&i18n.t("close-confirm-title")));
    add_dialog_button(&dialog, &i18n.t("ok"), ResponseType::Accept);
    add_dialog_button(&dialog, &i18n.t("cancel"), ResponseType::Cancel);

    let content = pad_content(&dialog);
    let label = Label::new(Some(&i18n.t("close-confirm-message")));
    label.set_wrap(true);
    content.append(&label);

    dialog
}
