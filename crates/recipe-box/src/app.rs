use crate::{
    AppCommand, AppResult, View,
    app_command::{FormField, RecipeRef},
    command_parser,
    config::SampleOrigin,
};

use recipe_box_core::{
    KeyValueStore, NarrationTarget, RecipeForm, RecipeId, RecipeLibrary, SpeechSynth,
    StepNarrator, samples,
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Sample document shipped with the binary.
const BUNDLED_SAMPLES: &str = include_str!("../resources/sample-recipes.json");

/// Whether the event loop keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep processing commands.
    Continue,
    /// Leave the event loop.
    Exit,
}

/// Main application state.
///
/// Owns the recipe library and the step narrator. Every command goes
/// through [`App::handle`], which mutates the library, re-targets the
/// narrator at the selected recipe, then renders.
pub struct App<S: KeyValueStore> {
    pub(crate) library: RecipeLibrary<S>,
    pub(crate) narrator: StepNarrator<Box<dyn SpeechSynth + Send>>,
    pub(crate) form: Option<RecipeForm>,
    pub(crate) samples: SampleOrigin,
    pub(crate) view: View,
    pub(crate) command_tx: mpsc::Sender<AppCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
}

impl<S: KeyValueStore> App<S> {
    /// Assemble the application around a loaded library.
    pub fn new(
        library: RecipeLibrary<S>,
        speech: Box<dyn SpeechSynth + Send>,
        samples: SampleOrigin,
        view: View,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::channel(32);
        Self {
            library,
            narrator: StepNarrator::new(speech),
            form: None,
            samples,
            view,
            command_tx,
            command_rx,
        }
    }

    /// Run the main application event loop until quit or end of input.
    #[instrument(skip(self, line_rx))]
    pub(crate) async fn run(mut self, mut line_rx: mpsc::Receiver<String>) -> AppResult<()> {
        info!(recipes = self.library.store().len(), "Recipe Box starting");

        self.view.line("Recipe Box. Type 'help' for commands.")?;
        self.dispatch(AppCommand::List);

        loop {
            tokio::select! {
                line = line_rx.recv() => {
                    let Some(line) = line else {
                        info!("Input closed, shutting down");
                        break;
                    };

                    match command_parser::parse(&line) {
                        Ok(Some(cmd)) => {
                            if self.dispatch(cmd) == Flow::Exit {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(e) => {
                            debug!(error = %e, "Unparseable input");
                            self.view.warning(&format!("Unrecognized input: {line}. Type 'help'."))?;
                        }
                    }
                }

                Some(cmd) = self.command_rx.recv() => {
                    if self.dispatch(cmd) == Flow::Exit {
                        break;
                    }
                }
            }
        }

        self.narrator.stop();
        info!("Recipe Box shut down successfully");

        Ok(())
    }

    /// Handle a command, logging failures instead of propagating them.
    pub(crate) fn dispatch(&mut self, cmd: AppCommand) -> Flow {
        match self.handle(cmd) {
            Ok(flow) => flow,
            Err(e) => {
                error!(error = ?e, "Failed to handle command");
                Flow::Continue
            }
        }
    }

    /// Apply one command.
    #[instrument(skip(self))]
    pub(crate) fn handle(&mut self, cmd: AppCommand) -> AppResult<Flow> {
        // A delete prompt must be answered by the very next user command.
        // Background results arriving meanwhile leave it armed.
        let keeps_prompt = matches!(
            cmd,
            AppCommand::Delete(_)
                | AppCommand::Confirm
                | AppCommand::Deny
                | AppCommand::SamplesLoaded { .. }
        );
        if !keeps_prompt && self.library.pending_delete().is_some() {
            debug!("Pending delete dropped by another command");
            self.library.cancel_delete();
        }

        match cmd {
            AppCommand::List => self.show_list()?,
            AppCommand::Categories => {
                let categories = self.library.categories();
                self.view.categories(&categories)?;
            }
            AppCommand::Filter(category) => {
                self.library.set_category(category);
                self.show_list()?;
            }
            AppCommand::FavoritesOnly(only) => {
                self.library.set_only_favorites(only);
                self.show_list()?;
            }
            AppCommand::Select(recipe_ref) => match self.resolve(&recipe_ref) {
                Some(id) => {
                    self.close_form();
                    self.library.select(id);
                    self.sync_narrator();
                    self.show_selected()?;
                }
                None => self.view.warning("No such recipe.")?,
            },
            AppCommand::Show => self.show_selected()?,
            AppCommand::New => {
                self.library.begin_create();
                self.form = Some(RecipeForm::new());
                self.sync_narrator();
                self.show_form()?;
            }
            AppCommand::Edit => {
                if self.library.begin_edit() {
                    self.form = self.library.selected().map(RecipeForm::from_recipe);
                    self.show_form()?;
                } else {
                    self.view.warning("Select a recipe to edit first.")?;
                }
            }
            AppCommand::SetField(field, value) => {
                if let Some(form) = self.form.as_mut() {
                    let slot = match field {
                        FormField::Title => &mut form.title,
                        FormField::Time => &mut form.time,
                        FormField::Difficulty => &mut form.difficulty,
                        FormField::Category => &mut form.category,
                        FormField::ImageUrl => &mut form.image_url,
                    };
                    *slot = value;
                }
                self.show_form()?;
            }
            AppCommand::AddIngredient(line) => {
                if let Some(form) = self.form.as_mut() {
                    form.push_ingredient(&line);
                }
                self.show_form()?;
            }
            AppCommand::AddStep(line) => {
                if let Some(form) = self.form.as_mut() {
                    form.push_step(&line);
                }
                self.show_form()?;
            }
            AppCommand::ClearIngredients => {
                if let Some(form) = self.form.as_mut() {
                    form.clear_ingredients();
                }
                self.show_form()?;
            }
            AppCommand::ClearSteps => {
                if let Some(form) = self.form.as_mut() {
                    form.clear_steps();
                }
                self.show_form()?;
            }
            AppCommand::Save => match self.form.take() {
                Some(form) => {
                    let id = self.library.save(form.to_draft());
                    self.report_persist()?;
                    self.sync_narrator();
                    info!(recipe_id = %id, "Recipe saved");
                    self.show_selected()?;
                }
                None => self.view.warning("Nothing to save. Use 'new' or 'edit'.")?,
            },
            AppCommand::Cancel => {
                self.close_form();
                self.view.line("Editing cancelled.")?;
            }
            AppCommand::ToggleFavorite(recipe_ref) => match self.target_id(recipe_ref) {
                Some(id) => {
                    let state = self.library.toggle_favorite(&id);
                    self.report_persist()?;
                    match state {
                        Some(true) => self.view.line("Added to favorites.")?,
                        Some(false) => self.view.line("Removed from favorites.")?,
                        None => self.view.warning("No such recipe.")?,
                    }
                }
                None => self.view.warning("No such recipe.")?,
            },
            AppCommand::Delete(recipe_ref) => {
                let pending = self
                    .target_id(recipe_ref)
                    .and_then(|id| self.library.request_delete(&id).map(|r| r.title.clone()));
                match pending {
                    Some(title) => self
                        .view
                        .line(&format!("Delete recipe \"{title}\"? (yes/no)"))?,
                    None => self.view.warning("No such recipe.")?,
                }
            }
            AppCommand::Confirm => {
                if self.library.confirm_delete() {
                    self.report_persist()?;
                    if !self.library.is_editing() {
                        self.form = None;
                    }
                    self.sync_narrator();
                    self.view.line("Recipe deleted.")?;
                } else {
                    self.view.warning("Nothing to confirm.")?;
                }
            }
            AppCommand::Deny => {
                self.library.cancel_delete();
                self.view.line("Kept.")?;
            }
            AppCommand::LoadSamples => {
                // Detached: the result comes back as `SamplesLoaded`.
                drop(self.load_samples());
                self.view.line("Loading sample recipes...")?;
            }
            AppCommand::SamplesLoaded {
                request_id,
                samples,
            } => {
                let added = self.library.merge_samples(samples);
                self.report_persist()?;
                self.sync_narrator();
                info!(request_id = %request_id, added, "Samples applied");
                self.view
                    .line(&format!("Added {added} sample recipe(s)."))?;
                self.show_list()?;
            }
            AppCommand::Play => {
                self.narrator.start();
                self.show_narration()?;
            }
            AppCommand::Stop => {
                self.narrator.stop();
                self.show_narration()?;
            }
            AppCommand::Next => {
                self.narrator.next();
                self.show_narration()?;
            }
            AppCommand::Previous => {
                self.narrator.previous();
                self.show_narration()?;
            }
            AppCommand::Help => self.view.help()?,
            AppCommand::Quit => {
                info!("Quit requested");
                return Ok(Flow::Exit);
            }
        }

        Ok(Flow::Continue)
    }

    /// Fetch samples off the event loop and post them back as a command.
    ///
    /// If the app has stopped by the time the fetch resolves, the send fails
    /// and the batch is dropped instead of being applied.
    pub(crate) fn load_samples(&self) -> JoinHandle<()> {
        let request_id = Uuid::new_v4();
        let origin = self.samples.clone();
        let command_tx = self.command_tx.clone();

        tokio::spawn(async move {
            let result = match &origin {
                SampleOrigin::Bundled => samples::parse_samples(BUNDLED_SAMPLES),
                SampleOrigin::Remote(source) => samples::fetch(source).await,
            };

            let samples = match result {
                Ok(samples) => samples,
                Err(e) => {
                    error!(request_id = %request_id, error = %e, "Failed to load sample recipes");
                    return;
                }
            };

            if command_tx
                .send(AppCommand::SamplesLoaded {
                    request_id,
                    samples,
                })
                .await
                .is_err()
            {
                debug!(request_id = %request_id, "App stopped, discarding sample recipes");
            }
        })
    }

    fn resolve(&self, recipe_ref: &RecipeRef) -> Option<RecipeId> {
        match recipe_ref {
            RecipeRef::Position(position) => position
                .checked_sub(1)
                .and_then(|i| self.library.visible().get(i).map(|r| r.id.clone())),
            RecipeRef::Id(id) => self.library.store().contains(id).then(|| id.clone()),
        }
    }

    fn target_id(&self, recipe_ref: Option<RecipeRef>) -> Option<RecipeId> {
        match recipe_ref {
            Some(r) => self.resolve(&r),
            None => self.library.selected().map(|r| r.id.clone()),
        }
    }

    fn close_form(&mut self) {
        self.library.cancel_edit();
        self.form = None;
    }

    fn sync_narrator(&mut self) {
        match self.library.selected().map(NarrationTarget::from_recipe) {
            Some(target) => self.narrator.load(target),
            None => self.narrator.unload(),
        };
    }

    fn report_persist(&mut self) -> AppResult<()> {
        if self.library.store().last_persist_failed() {
            warn!("Recipes kept in memory only");
            self.view
                .warning("Could not save to storage. Changes will be lost on exit.")?;
        }
        Ok(())
    }

    fn show_list(&mut self) -> AppResult<()> {
        let visible = self.library.visible();
        self.view
            .recipe_list(&visible, self.library.selected_id())?;
        Ok(())
    }

    fn show_selected(&mut self) -> AppResult<()> {
        match self.library.selected() {
            Some(recipe) => self.view.recipe_detail(recipe)?,
            None => self.view.line("Select a recipe.")?,
        }
        Ok(())
    }

    fn show_form(&mut self) -> AppResult<()> {
        match &self.form {
            Some(form) => {
                let existing = self.library.selected().is_some();
                self.view.form(form, existing)?;
            }
            None => self.view.warning("No form open. Use 'new' or 'edit'.")?,
        }
        Ok(())
    }

    fn show_narration(&mut self) -> AppResult<()> {
        self.view.narration(
            self.narrator.current_index(),
            self.narrator.step_count(),
            self.narrator.current_step(),
            self.narrator.is_playing(),
        )?;
        Ok(())
    }
}
