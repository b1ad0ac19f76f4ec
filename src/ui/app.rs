use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use fluent_bundle::FluentArgs;
use gtk4::gdk::Display;
use gtk4::gio::{Menu, SimpleAction};
use gtk4::prelude::*;
use gtk4::{
    Application, ApplicationWindow, AspectFrame, Box as GtkBox, CssProvider, HeaderBar, Label,
    MenuButton, Orientation, Separator, STYLE_PROVIDER_PRIORITY_APPLICATION,
};

use super::board::{self, PacePhase, PacingState};
use super::dialogs;
use super::resources::GameResources;
use crate::game::logic::MatchContext;
use crate::game::rng::ThreadDice;
use crate::game::types::MatchState;
use crate::i18n::I18n;

/// Persist the window size, snapped to the scene's aspect ratio so the
/// board always fits on the next start.
fn save_window_geometry(win: &ApplicationWindow) {
    let mut s = crate::storage::load_settings();
    let win_w = win.width();
    let win_h = win.height();

    let aspect = super::rendering::REF_WIDTH / super::rendering::REF_HEIGHT;
    let h_from_w = ((win_w as f64) / aspect).round() as i32;
    let w_from_h = ((win_h as f64) * aspect).round() as i32;
    let (final_w, final_h) = {
        let dw = (win_h - h_from_w).abs();
        let dh = (win_w - w_from_h).abs();
        if dw <= dh {
            (win_w, h_from_w)
        } else {
            (w_from_h, win_h)
        }
    };
    s.window_width = Some(final_w);
    s.window_height = Some(final_h);
    let _ = crate::storage::save_settings(&s);
}

/// Build and present the main application window.
pub fn build_ui(app: &Application, resources_dir: &str) {
    // ── Shared state ──
    let settings = crate::storage::load_settings();
    let mut initial_state = MatchContext::new();
    initial_state.statistics = crate::storage::load_statistics();
    let state = Rc::new(RefCell::new(initial_state));
    let resources = Rc::new(GameResources::load(resources_dir));
    let i18n = Rc::new(I18n::load_from_dir(resources_dir));
    let pacing = Rc::new(RefCell::new(PacingState::new()));

    // ── CSS ──
    let provider = CssProvider::new();
    let css = "
        .title-label  { font-weight: 700; font-size: 15px; }
        .stat-label   { font-size: 12px; margin: 0 6px; }
        .game-scene   { background-color: #404040; }
    ";
    provider.load_from_data(css);
    if let Some(display) = Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }

    // ── Window ──
    let win_title = i18n.t("app-title");
    let window = ApplicationWindow::builder()
        .application(app)
        .title(&win_title)
        .default_width(400)
        .default_height(640)
        .resizable(true)
        .build();

    if let (Some(w), Some(h)) = (settings.window_width, settings.window_height) {
        window.set_default_size(w, h);
    }

    // ── Header bar ──
    let header = HeaderBar::new();
    header.set_show_title_buttons(true);
    let header_title = Label::new(Some(&i18n.t("app-title")));
    header_title.add_css_class("title-label");
    header.set_title_widget(Some(&header_title));

    // ── Hamburger menu ──
    let menu = Menu::new();
    menu.append(Some(&i18n.t("menu-new-match")), Some("win.new-match"));
    let section2 = Menu::new();
    section2.append(Some(&i18n.t("menu-info")), Some("win.info"));
    menu.append_section(None, &section2);

    let menu_button = MenuButton::new();
    menu_button.set_icon_name("open-menu-symbolic");
    menu_button.set_menu_model(Some(&menu));
    header.pack_end(&menu_button);

    // ── Main layout ──
    let main_box = GtkBox::new(Orientation::Vertical, 0);

    // Game scene, wrapped in an AspectFrame to keep the 400x600 ratio
    let drawing_area =
        board::create_board(state.clone(), resources.clone(), i18n.clone(), pacing.clone());
    drawing_area.add_css_class("game-scene");
    let aspect_frame = AspectFrame::new(
        0.5,
        0.5,
        (super::rendering::REF_WIDTH / super::rendering::REF_HEIGHT) as f32,
        false,
    );
    aspect_frame.set_child(Some(&drawing_area));
    aspect_frame.set_hexpand(true);
    aspect_frame.set_vexpand(true);
    main_box.append(&aspect_frame);

    // Status bar with cumulative match statistics
    let status_bar = GtkBox::new(Orientation::Horizontal, 8);
    status_bar.set_margin_start(8);
    status_bar.set_margin_end(8);
    status_bar.set_margin_top(4);
    status_bar.set_margin_bottom(4);

    let stat_player = Label::new(None);
    stat_player.add_css_class("stat-label");
    let stat_computer = Label::new(None);
    stat_computer.add_css_class("stat-label");
    let stat_ties = Label::new(None);
    stat_ties.add_css_class("stat-label");

    status_bar.append(&stat_player);
    status_bar.append(&Separator::new(Orientation::Vertical));
    status_bar.append(&stat_computer);
    status_bar.append(&Separator::new(Orientation::Vertical));
    status_bar.append(&stat_ties);

    main_box.append(&status_bar);

    // ── Stats updater ──
    let update_stats = {
        let state = state.clone();
        let i18n = i18n.clone();
        let stat_player = stat_player.clone();
        let stat_computer = stat_computer.clone();
        let stat_ties = stat_ties.clone();
        move || {
            let st = state.borrow();
            stat_player.set_text(&format!(
                "{}: {}",
                i18n.t("stat-player"),
                st.statistics.player_wins
            ));
            stat_computer.set_text(&format!(
                "{}: {}",
                i18n.t("stat-computer"),
                st.statistics.computer_wins
            ));
            stat_ties.set_text(&format!("{}: {}", i18n.t("stat-ties"), st.statistics.ties));
        }
    };
    update_stats();

    // ── Pacing tick (time-based) ──
    // Drives the timed transitions: toss reveal -> toss resolution,
    // innings close -> chase.
    {
        let state = state.clone();
        let pacing = pacing.clone();
        let update_stats = update_stats.clone();
        let last_time = Rc::new(RefCell::new(Instant::now()));
        drawing_area.add_tick_callback(move |widget, _clock| {
            let now = Instant::now();
            let mut lt = last_time.borrow_mut();
            let dt = now.duration_since(*lt);
            *lt = now;
            drop(lt);

            let mut pace = pacing.borrow_mut();
            match pace.phase.clone() {
                PacePhase::Idle => {}

                PacePhase::TossReveal { time_left } => {
                    if time_left.is_zero() {
                        let settle = pace.toss_settle_duration();
                        pace.phase = PacePhase::TossSettle { time_left: settle };
                        drop(pace);
                        let mut dice = ThreadDice;
                        state.borrow_mut().resolve_toss(&mut dice);
                        widget.queue_draw();
                    } else {
                        pace.phase = PacePhase::TossReveal {
                            time_left: time_left.saturating_sub(dt),
                        };
                    }
                }

                PacePhase::TossSettle { time_left } => {
                    if time_left.is_zero() {
                        pace.phase = PacePhase::Idle;
                    } else {
                        pace.phase = PacePhase::TossSettle {
                            time_left: time_left.saturating_sub(dt),
                        };
                    }
                }

                PacePhase::InningsBreak { time_left } => {
                    if time_left.is_zero() {
                        pace.phase = PacePhase::Idle;
                        drop(pace);
                        state.borrow_mut().begin_second_innings();
                        widget.queue_draw();
                    } else {
                        pace.phase = PacePhase::InningsBreak {
                            time_left: time_left.saturating_sub(dt),
                        };
                    }
                }
            }

            update_stats();
            glib::Continue(true)
        });
    }

    // ── Actions ──
    // New match (same as the on-canvas Restart button)
    {
        let action = SimpleAction::new("new-match", None);
        let state = state.clone();
        let pacing = pacing.clone();
        let drawing_area = drawing_area.clone();
        let update_stats = update_stats.clone();
        let i18n = i18n.clone();
        let win_for_closure = window.clone();
        action.connect_activate(move |_, _| {
            let in_progress = state.borrow().state == MatchState::Playing;
            if in_progress {
                let state = state.clone();
                let pacing = pacing.clone();
                let drawing_area = drawing_area.clone();
                let update_stats = update_stats.clone();
                dialogs::confirm_restart(&win_for_closure, &i18n, move || {
                    state.borrow_mut().restart();
                    pacing.borrow_mut().reset();
                    drawing_area.queue_draw();
                    update_stats();
                });
            } else {
                state.borrow_mut().restart();
                pacing.borrow_mut().reset();
                drawing_area.queue_draw();
                update_stats();
            }
        });
        window.add_action(&action);
    }

    // Info
    {
        let action = SimpleAction::new("info", None);
        let win_for_closure = window.clone();
        let i18n = i18n.clone();
        action.connect_activate(move |_, _| {
            let mut args = FluentArgs::new();
            args.set("version", env!("CARGO_PKG_VERSION"));
            let mut body = i18n.t_args("info-body", &args);
            // Fluent stores literal "\n" sequences; convert them to real newlines
            body = body.replace("\\n", "\n");
            dialogs::show_info(&win_for_closure, &i18n.t("menu-info"), &body, &i18n);
        });
        window.add_action(&action);
    }

    // ── Close-request handler (warn if a match is in progress) ──
    {
        let state = state.clone();
        let i18n = i18n.clone();
        window.connect_close_request(move |win| {
            let st = state.borrow();
            if st.state == MatchState::Playing {
                drop(st);
                let dialog = dialogs::confirm_close(win, &i18n);
                let win = win.clone();
                dialog.connect_response(move |dialog, response| {
                    dialog.close();
                    if response == gtk4::ResponseType::Accept {
                        win.destroy();
                    }
                });
                dialog.show();
                gtk4::Inhibit(true)
            } else {
                save_window_geometry(win);
                gtk4::Inhibit(false)
            }
        });
    }

    window.set_titlebar(Some(&header));
    window.set_child(Some(&main_box));

    // Persist window size on destroy so it can be restored next start.
    window.connect_destroy(|win| {
        save_window_geometry(win);
    });

    window.present();
}
