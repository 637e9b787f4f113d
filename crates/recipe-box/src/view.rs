//! Plain-text rendering of the recipe views.

use std::io::{self, Write};

use recipe_box_core::{DIFFICULTIES, Recipe, RecipeForm, RecipeId};

const HELP: &str = "\
Browsing:
  list | categories | filter <category|all> | favorites on|off
  select <n|id> | show | fav [n|id] | delete [n|id] | samples
Editing:
  new | edit | title|time|difficulty|category|image <text>
  ingredient <text> | step <text> | clear-ingredients | clear-steps | save | cancel
Narration:
  play | stop | next | prev
Other:
  help | quit";

/// Text console the application renders into.
pub struct View {
    out: Box<dyn Write + Send>,
}

impl View {
    /// Render into an arbitrary writer.
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self { out }
    }

    /// Render to standard output.
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Discard all output.
    #[cfg(test)]
    pub fn sink() -> Self {
        Self::new(Box::new(io::sink()))
    }

    /// Print one line.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    /// Print a non-fatal warning.
    pub fn warning(&mut self, text: &str) -> io::Result<()> {
        self.line(&format!("! {text}"))
    }

    /// Print the command reference.
    pub fn help(&mut self) -> io::Result<()> {
        self.line(HELP)
    }

    /// Print the filtered list, or an empty-state hint.
    pub fn recipe_list(
        &mut self,
        recipes: &[&Recipe],
        selected: Option<&RecipeId>,
    ) -> io::Result<()> {
        if recipes.is_empty() {
            return self.line("No recipes to show. Type 'new' to create one or 'samples' to load examples.");
        }

        for (i, recipe) in recipes.iter().enumerate() {
            let marker = if selected == Some(&recipe.id) { '>' } else { ' ' };
            let star = if recipe.is_favorite { '*' } else { ' ' };
            let category = recipe.category.as_deref().unwrap_or("uncategorized");
            writeln!(
                self.out,
                "{marker}{:>3}. {star} {} [{category}]",
                i + 1,
                recipe.title
            )?;
        }
        self.out.flush()
    }

    /// Print every category, with the "all" entry first.
    pub fn categories(&mut self, categories: &[String]) -> io::Result<()> {
        self.line("all")?;
        for category in categories {
            self.line(category)?;
        }
        Ok(())
    }

    /// Print one recipe in full.
    pub fn recipe_detail(&mut self, recipe: &Recipe) -> io::Result<()> {
        let star = if recipe.is_favorite { " *" } else { "" };
        writeln!(self.out, "{}{star}", recipe.title)?;
        writeln!(
            self.out,
            "Time: {} | Difficulty: {} | Category: {}",
            recipe.time.as_deref().unwrap_or("n/a"),
            recipe.difficulty.as_deref().unwrap_or("n/a"),
            recipe.category.as_deref().unwrap_or("uncategorized"),
        )?;
        if let Some(url) = &recipe.image_url {
            writeln!(self.out, "Image: {}", abbreviate(url))?;
        }

        writeln!(self.out, "Ingredients:")?;
        if recipe.ingredients.is_empty() {
            writeln!(self.out, "  (none yet)")?;
        }
        for item in &recipe.ingredients {
            writeln!(self.out, "  - {item}")?;
        }

        writeln!(self.out, "Steps:")?;
        if recipe.steps.is_empty() {
            writeln!(self.out, "  (none yet)")?;
        }
        for (i, step) in recipe.steps.iter().enumerate() {
            writeln!(self.out, "  {}. {step}", i + 1)?;
        }
        self.out.flush()
    }

    /// Print the form being edited.
    pub fn form(&mut self, form: &RecipeForm, existing: bool) -> io::Result<()> {
        let heading = if existing { "Edit recipe" } else { "New recipe" };
        writeln!(self.out, "{heading}")?;
        writeln!(self.out, "  title:      {}", form.title)?;
        writeln!(self.out, "  time:       {}", form.time)?;
        writeln!(
            self.out,
            "  difficulty: {} (options: {})",
            form.difficulty,
            DIFFICULTIES.join(", ")
        )?;
        writeln!(self.out, "  category:   {}", form.category)?;
        writeln!(self.out, "  image:      {}", abbreviate(&form.image_url))?;
        writeln!(self.out, "  ingredients:")?;
        for line in form.ingredients_text.lines() {
            writeln!(self.out, "    {line}")?;
        }
        writeln!(self.out, "  steps:")?;
        for line in form.steps_text.lines() {
            writeln!(self.out, "    {line}")?;
        }
        self.out.flush()
    }

    /// Print the narrator position.
    pub fn narration(
        &mut self,
        index: usize,
        count: usize,
        step: Option<&str>,
        playing: bool,
    ) -> io::Result<()> {
        let Some(step) = step else {
            return self.line("This recipe has no steps to narrate.");
        };
        let status = if playing { "playing" } else { "stopped" };
        self.line(&format!("Step {} of {count} ({status}): {step}", index + 1))
    }
}

// Data URLs can be megabytes long.
fn abbreviate(url: &str) -> String {
    const MAX: usize = 60;
    match url.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &url[..cut]),
        None => url.to_string(),
    }
}
