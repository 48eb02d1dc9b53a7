//! Line-oriented front end.
//!
//! Each input line is one command applied to `CoreState`; the resolved
//! screen is printed after every command. Failures from foreground actions
//! print as `! <message>` and never end the session.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use crate::adoption::{self, ListingForm, ListingImage};
use crate::auth::{self, LoginForm, RegisterForm};
use crate::booking::{self, BookingForm};
use crate::core_state::CoreState;
use crate::dashboard;
use crate::error::AppError;
use crate::models::{Role, StatusFilter};
use crate::prediction::{PredictForm, PredictTab};
use crate::router::View;
use crate::views;

const HELP: &str = "\
commands:
  nav <view>                       open a view (home, login, register, booking, predict,
                                   add-dog, my-appointments, vet-dashboard, analytics)
  menu                             show or hide the navigation menu
  login <email> <password> <role>  sign in as owner or vet
  register <email> <password> <role> <full name>
  logout
  book                             request an appointment
  accept <id> | reject <id> [reason]  (reason is asked for when omitted)
  filter <all|pending|accepted|rejected>
  predict-image <path> | predict-text <symptoms>
  tab <upload|symptoms>            switch the prediction input mode
  scroll [rows]                    move down the dog listings (default 5)
  add-dog                          list a dog for adoption
  sync                             refetch from the server
  help | quit";

const DEFAULT_SCROLL_ROWS: usize = 5;

enum Flow {
    Continue,
    Quit,
}

pub struct Shell<R, W> {
    input: R,
    output: W,
    predict: PredictForm,
    pause_on_confirmation: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            predict: PredictForm::new(),
            pause_on_confirmation: true,
        }
    }

    /// Expire confirmations immediately instead of waiting them out.
    pub fn without_pauses(mut self) -> Self {
        self.pause_on_confirmation = false;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read and apply commands until `quit` or end of input.
    pub fn run(&mut self, state: &mut CoreState) -> io::Result<()> {
        state.settle();
        self.show(state)?;
        loop {
            let Some(line) = self.read_line("> ")? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match self.execute(state, line)? {
                Flow::Continue => {}
                Flow::Quit => break,
            }
            self.show(state)?;
            self.finish_confirmation(state)?;
        }
        tracing::info!("Shell closed");
        Ok(())
    }

    fn show(&mut self, state: &CoreState) -> io::Result<()> {
        views::write_frame(&mut self.output, &views::render(state))
    }

    fn alert(&mut self, err: &AppError) -> io::Result<()> {
        tracing::debug!(error = %err, "Alert");
        writeln!(self.output, "! {err}")
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompt for one form field; end of input reads as blank.
    fn ask(&mut self, label: &str) -> io::Result<String> {
        Ok(self.read_line(&format!("{label}: "))?.unwrap_or_default())
    }

    /// Hold a confirmation on screen for its interval, then return home.
    fn finish_confirmation(&mut self, state: &mut CoreState) -> io::Result<()> {
        let Some((expires_at, wait)) = state
            .confirmation()
            .map(|c| (c.expires_at(), c.remaining(Instant::now())))
        else {
            return Ok(());
        };
        if self.pause_on_confirmation {
            std::thread::sleep(wait);
        }
        if state.tick(expires_at) {
            self.show(state)?;
        }
        Ok(())
    }

    fn execute(&mut self, state: &mut CoreState, line: &str) -> io::Result<Flow> {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let result = match command {
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => {
                writeln!(self.output, "{HELP}")?;
                Ok(())
            }
            "nav" => {
                state.navigate_to_name(rest);
                Ok(())
            }
            "menu" => {
                state.toggle_menu();
                Ok(())
            }
            "sync" => {
                let report = state.sync();
                writeln!(self.output, "listings: {:?}", report.listings)?;
                if let Some(appointments) = report.appointments {
                    writeln!(self.output, "appointments: {appointments:?}")?;
                }
                Ok(())
            }
            "logout" => {
                state.logout();
                Ok(())
            }
            "login" => self.login(state, rest),
            "register" => self.register(state, rest),
            "book" => self.book(state)?,
            "accept" => dashboard::accept(state, rest).map(|_| ()),
            "reject" => self.reject(state, rest)?,
            "filter" => self.filter(state, rest)?,
            "predict-text" => {
                self.predict.set_symptoms(rest);
                self.run_prediction(state)?
            }
            "predict-image" => {
                match self.predict.select_image_file(Path::new(rest)) {
                    Ok(()) => self.run_prediction(state)?,
                    Err(e) => Err(e),
                }
            }
            "tab" => match rest.parse::<PredictTab>() {
                Ok(tab) => {
                    self.predict.select_tab(tab);
                    writeln!(self.output, "Prediction input: {tab:?}")?;
                    Ok(())
                }
                Err(e) => Err(AppError::from(e)),
            },
            "scroll" => match rest {
                "" => {
                    state.scroll_by(DEFAULT_SCROLL_ROWS);
                    Ok(())
                }
                rows => match rows.parse::<usize>() {
                    Ok(rows) => {
                        state.scroll_by(rows);
                        Ok(())
                    }
                    Err(_) => {
                        writeln!(self.output, "! Scroll needs a row count, got '{rows}'.")?;
                        Ok(())
                    }
                },
            },
            "add-dog" => self.add_dog(state)?,
            other => {
                writeln!(self.output, "! Unknown command '{other}'. Type help.")?;
                Ok(())
            }
        };

        if let Err(err) = result {
            self.alert(&err)?;
        }
        Ok(Flow::Continue)
    }

    fn login(&mut self, state: &mut CoreState, args: &str) -> Result<(), AppError> {
        let mut parts = args.split_whitespace();
        let email = parts.next().unwrap_or_default().to_string();
        let password = parts.next().unwrap_or_default().to_string();
        let role: Role = parts.next().unwrap_or("owner").parse()?;
        auth::login(state, &LoginForm { email, password, role }).map(|_| ())
    }

    fn register(&mut self, state: &mut CoreState, args: &str) -> Result<(), AppError> {
        let mut parts = args.splitn(4, char::is_whitespace);
        let email = parts.next().unwrap_or_default().to_string();
        let password = parts.next().unwrap_or_default().to_string();
        let role: Role = parts.next().unwrap_or("owner").parse()?;
        let full_name = parts.next().unwrap_or_default().to_string();
        let form = RegisterForm {
            full_name,
            email,
            password,
            role,
        };
        auth::register(state, &form).map(|_| ())
    }

    fn reject(&mut self, state: &mut CoreState, args: &str) -> io::Result<Result<(), AppError>> {
        let (id, inline) = match args.split_once(char::is_whitespace) {
            Some((id, reason)) => (id, reason.trim().to_string()),
            None => (args, String::new()),
        };
        if let Err(e) = state.ensure_access(View::VetDashboard) {
            return Ok(Err(e));
        }
        let reason = if inline.is_empty() {
            self.ask("Reason (optional)")?
        } else {
            inline
        };
        let reason = reason.trim();
        let reason = (!reason.is_empty()).then_some(reason);
        Ok(dashboard::reject(state, id, reason).map(|_| ()))
    }

    fn book(&mut self, state: &mut CoreState) -> io::Result<Result<(), AppError>> {
        if let Err(e) = state.ensure_access(View::Booking) {
            return Ok(Err(e));
        }
        state.navigate(View::Booking);
        let email = match state.session() {
            Some(s) => s.email.clone(),
            None => self.ask("Email")?,
        };
        let form = BookingForm {
            dog_name: self.ask("Dog's name")?,
            owner_name: self.ask("Owner's name")?,
            contact: self.ask("Contact number")?,
            email,
            date: self.ask("Date (YYYY-MM-DD)")?,
            time: self.ask("Time (HH:MM)")?,
            notes: self.ask("Notes")?,
        };
        Ok(booking::submit(state, &form).map(|_| ()))
    }

    fn add_dog(&mut self, state: &mut CoreState) -> io::Result<Result<(), AppError>> {
        if let Err(e) = state.ensure_access(View::AddDog) {
            return Ok(Err(e));
        }
        state.navigate(View::AddDog);
        let name = self.ask("Dog's name")?;
        let age = self.ask("Age (years)")?;
        let breed = self.ask("Breed")?;
        let description = self.ask("Description")?;
        let location = self.ask("Location")?;
        let photo = self.ask("Photo (URL or file path, blank for none)")?;

        let image = match photo.trim() {
            "" => ListingImage::None,
            url if url.starts_with("http://") || url.starts_with("https://") => {
                ListingImage::Url(url.to_string())
            }
            path => match ListingImage::from_file(Path::new(path)) {
                Ok(image) => image,
                Err(e) => return Ok(Err(e)),
            },
        };
        let form = ListingForm {
            name,
            age,
            breed,
            description,
            location,
            image,
        };
        Ok(adoption::submit(state, &form).map(|_| ()))
    }

    fn filter(&mut self, state: &CoreState, arg: &str) -> io::Result<Result<(), AppError>> {
        if let Err(e) = state.ensure_access(View::VetDashboard) {
            return Ok(Err(e));
        }
        let filter: StatusFilter = match arg.parse() {
            Ok(filter) => filter,
            Err(e) => return Ok(Err(AppError::from(e))),
        };
        let matching = dashboard::filtered(state, filter);
        writeln!(self.output, "{} appointment(s):", matching.len())?;
        for appt in matching {
            writeln!(
                self.output,
                "  [{}] {} {} {} {}",
                appt.id,
                appt.status.label(),
                appt.date,
                appt.time,
                appt.dog_name
            )?;
        }
        Ok(Ok(()))
    }

    fn run_prediction(&mut self, state: &CoreState) -> io::Result<Result<(), AppError>> {
        match self.predict.submit(state) {
            Ok(prediction) => {
                let line = format!(
                    "Prediction: {} ({} confidence)\nSeverity: {}\nRecommendation: {}",
                    prediction.display_name(),
                    prediction.confidence,
                    prediction.severity,
                    prediction.recommendation
                );
                writeln!(self.output, "{line}")?;
                Ok(Ok(()))
            }
            Err(e) => Ok(Err(e)),
        }
    }
}
