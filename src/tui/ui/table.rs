use crate::cards::{Card, Suit};
use crate::game::{Round, RoundOutcome, Seat, TRICKS_PER_ROUND};
use crate::tui::app::{AppState, BOT_SEAT, HUMAN_SEAT};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, columns, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let header_height: u16 = 2 + 2;
    let status_height: u16 = 3 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height), // header
            Constraint::Length(5),             // opponent hand
            Constraint::Min(5),                // trick area
            Constraint::Length(5),             // human hand
            Constraint::Length(status_height), // status bar
        ])
        .split(size);

    draw_header(f, chunks[0], app);

    let round = app.game.round().filter(|_| app.round_started);

    // Opponent cards stay face down until the round is over.
    let title = match app.bot_profile_label() {
        Some(label) => format!("Bot [{label}]"),
        None => "Bot".to_string(),
    };
    let opp_area = chunks[1];
    f.render_widget(Block::default().title(title).borders(Borders::ALL), opp_area);
    if let Some(r) = round {
        let reveal = r.is_over();
        let cards = r.hand(BOT_SEAT).sorted_for_display();
        for (slot, card) in columns(inner(opp_area), TRICKS_PER_ROUND as usize).iter().zip(&cards) {
            if reveal {
                render_card_widget(f, *slot, Some(*card), None);
            } else {
                render_card_back(f, *slot);
            }
        }
    }

    draw_trick_area(f, chunks[2], round);
    draw_human_hand(f, chunks[3], app, round);
    draw_status(f, chunks[4], app, round);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    }
}

fn seat_name(seat: Seat) -> &'static str {
    if seat == HUMAN_SEAT {
        "You"
    } else {
        "Bot"
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState) {
    let g = &app.game;
    let mut lines: Vec<Line> = Vec::with_capacity(2);
    lines.push(Line::from(format!(
        "Round #{}   Points: You {} / Bot {}   Rounds won: You {} / Bot {}",
        g.round_id(),
        g.points(HUMAN_SEAT),
        g.points(BOT_SEAT),
        g.rounds_won(HUMAN_SEAT),
        g.rounds_won(BOT_SEAT),
    )));
    let second = match g.round().filter(|_| app.round_started) {
        Some(r) => match r.trick_no() {
            Some(n) => format!("Trick {n}/{TRICKS_PER_ROUND}   Control: {}", seat_name(r.leader())),
            None => "Round over".to_string(),
        },
        None => "No round dealt".to_string(),
    };
    lines.push(Line::from(second));
    let header =
        Paragraph::new(lines).block(Block::default().title("garame").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_trick_area(f: &mut Frame, area: Rect, round: Option<&Round>) {
    let block = Block::default().title("Table").borders(Borders::ALL);
    f.render_widget(block, area);
    let Some(r) = round else {
        return;
    };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(inner(area));

    // Current trick: the lead sits in the leader's slot; the response comes next.
    let (bot_card, you_card) = match r.table() {
        Some(lead) if lead.seat == BOT_SEAT => (Some(lead.card), None),
        Some(lead) => (None, Some(lead.card)),
        None => (None, None),
    };
    let slot_style = |seat: Seat| (r.leader() == seat && !r.is_over()).then_some(Color::Yellow);
    render_labeled_card(f, cols[0], "Bot", bot_card, slot_style(BOT_SEAT));
    render_labeled_card(f, cols[1], "You", you_card, slot_style(HUMAN_SEAT));

    let mut lines: Vec<Line> = Vec::new();
    match r.last_trick() {
        Some(t) => {
            lines.push(Line::from(Span::styled(
                format!("Trick {}", t.number),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!(
                "{} led {}, {} played {}",
                seat_name(t.lead.seat),
                t.lead.card.pretty(),
                seat_name(t.response.seat),
                t.response.card.pretty(),
            )));
            let verb = if t.winner == t.lead.seat { "keeps" } else { "takes" };
            lines.push(Line::from(format!("{} {verb} control", seat_name(t.winner))));
        }
        None => lines.push(Line::from("No trick completed yet.")),
    }
    let winners: Vec<&str> = r.trick_winners().into_iter().map(seat_name).collect();
    if !winners.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Tricks: {}", winners.join(" ")),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), cols[2]);
}

fn draw_human_hand(f: &mut Frame, area: Rect, app: &AppState, round: Option<&Round>) {
    f.render_widget(Block::default().title("Your hand").borders(Borders::ALL), area);
    if round.is_none() {
        return;
    }
    let cards = app.human_cards();
    let legal = app.human_legal();
    for (i, (slot, card)) in
        columns(inner(area), TRICKS_PER_ROUND as usize).iter().zip(&cards).enumerate()
    {
        let border = if i == app.cursor && legal.contains(card) {
            Some(Color::Magenta)
        } else if i == app.cursor {
            Some(Color::Cyan)
        } else if legal.contains(card) {
            Some(Color::Yellow)
        } else {
            Some(Color::DarkGray)
        };
        render_card_widget(f, *slot, Some(*card), border);
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState, round: Option<&Round>) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(inner(area));

    let mut left_info = match round {
        None => vec![Line::from("No round dealt, press N to deal.")],
        Some(r) if r.is_over() => {
            let mut v = Vec::with_capacity(2);
            if let Some(outcome) = r.outcome() {
                v.push(Line::from(Span::styled(
                    outcome_line(outcome),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )));
            }
            v.push(Line::from("Round over, press N for the next deal."));
            v
        }
        Some(r) if r.current() == HUMAN_SEAT => {
            let obligation = r.status().map(|o| o.to_string()).unwrap_or_default();
            vec![Line::from(format!("Your turn: {obligation}"))]
        }
        Some(_) => vec![Line::from("Bot is thinking...")],
    };

    if let Some(err) = app.action_error() {
        left_info.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let right_keys = vec![
        Line::from("←/→ select • Enter play • 1-5 play"),
        Line::from("N deal • D difficulty"),
        Line::from("? help • H history • M menu"),
    ];
    let left_para = Paragraph::new(left_info).wrap(Wrap { trim: true });
    let right_para =
        Paragraph::new(right_keys).wrap(Wrap { trim: true }).alignment(Alignment::Right);
    f.render_widget(left_para, cols[0]);
    f.render_widget(right_para, cols[1]);
}

fn outcome_line(outcome: &RoundOutcome) -> String {
    let who = if outcome.winner == HUMAN_SEAT { "You win" } else { "Bot wins" };
    if let Some(win) = outcome.auto_win {
        return format!("{who} the round by {win}");
    }
    match outcome.multiplier() {
        1 => format!("{who} the round"),
        m => format!("{who} the round with {} (x{m})", outcome.kora.label()),
    }
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries = app.game.history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("No history yet."));
    } else {
        for entry in entries {
            let card = entry.card.map(|c| format!(" {}", c.pretty())).unwrap_or_default();
            lines.push(Line::from(format!(
                "{} {}{} [T{}]",
                seat_name(entry.seat),
                entry.verb.label(),
                card,
                entry.trick
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Rules:", bold)),
        Line::from("- Follow the led suit if you can; you need not beat it"),
        Line::from("- Higher card of the led suit takes control"),
        Line::from("- Whoever wins trick 5 wins the round"),
        Line::from("- Winning trick 5 with a 3 is a kora (x2, x4 if tricks 4 and 5)"),
        Line::from("- A dealt hand under 21, or three sevens, wins at once"),
        Line::from(""),
        Line::from(Span::styled("Table:", bold)),
        Line::from("- N / Space: deal a new round"),
        Line::from("- Left / Right: select card"),
        Line::from("- Enter: play selected card"),
        Line::from("- 1-5: play card by position"),
        Line::from("- D: cycle bot difficulty"),
        Line::from("- H: history"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: apply"),
        Line::from("- Esc: cancel"),
        Line::from("- Q: quit (menu)"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn suit_style(s: Suit) -> Style {
    match s {
        Suit::Hearts | Suit::Diamonds => Style::default().fg(Color::Red),
        Suit::Spades | Suit::Clubs => Style::default().fg(Color::White),
    }
}

fn render_labeled_card(f: &mut Frame, area: Rect, label: &str, card: Option<Card>, border: Option<Color>) {
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    f.render_widget(Paragraph::new(label.to_string()).alignment(Alignment::Center), split[0]);
    render_card_widget(f, split[1], card, border);
}

fn render_card_widget(f: &mut Frame, area: Rect, card: Option<Card>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL).title_alignment(Alignment::Center);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let inner = inner(area);
    f.render_widget(block, area);
    let content = match card {
        Some(c) => Line::from(Span::styled(c.pretty(), suit_style(c.suit()))),
        None => Line::from("[  ]"),
    };
    let para = Paragraph::new(content).alignment(Alignment::Center);
    f.render_widget(para, inner);
}

fn render_card_back(f: &mut Frame, area: Rect) {
    let block =
        Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray));
    let inner = inner(area);
    f.render_widget(block, area);
    let para = Paragraph::new(Line::from(Span::styled("##", Style::default().fg(Color::Blue))))
        .alignment(Alignment::Center);
    f.render_widget(para, inner);
}
