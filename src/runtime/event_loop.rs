use std::io::{self, BufRead, Write};

use crate::playback::{PlaybackHandle, PlaybackState, Player};

pub fn run(player: &Player) -> Result<(), Box<dyn std::error::Error>> {
    let info = player.playback_handle();

    println!("commands: play  pause  seek <s>  chseek <s>  rate <x>  info  stop  quit");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();

        match parts.next() {
            Some("play") => player.set_playing(true)?,
            Some("pause") => player.set_playing(false)?,

            Some("seek") => match parts.next().and_then(|s| s.parse::<f64>().ok()) {
                Some(to) => player.seek(to, false)?,
                None => println!("usage: seek <seconds>"),
            },
            // Seek relative to the start of the current chapter.
            Some("chseek") => match parts.next().and_then(|s| s.parse::<f64>().ok()) {
                Some(to) => player.seek(to, true)?,
                None => println!("usage: chseek <seconds>"),
            },

            Some("rate") => match parts.next().and_then(|s| s.parse::<f32>().ok()) {
                Some(rate) => player.set_playback_rate(rate)?,
                None => println!("usage: rate <multiplier>"),
            },

            Some("info") => print_info(&info),
            Some("stop") => player.stop()?,
            Some("quit") | Some("q") => break,

            Some(other) => println!("unknown command: {other}"),
            None => {}
        }

        io::stdout().flush()?;
    }

    player.quit();
    Ok(())
}

fn print_info(info: &PlaybackHandle) {
    let Ok(i) = info.lock() else {
        return;
    };

    match i.state {
        PlaybackState::Idle => println!("idle"),
        state => println!(
            "{:?} {} | track {} | {:.1}s / {:.1}s @ {}x",
            state,
            i.item_id.as_deref().unwrap_or("?"),
            i.active_track.map(|t| t + 1).unwrap_or(0),
            i.position,
            i.duration,
            i.rate,
        ),
    }
}
