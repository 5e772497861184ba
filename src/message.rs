use super::*;

pub(crate) const PROCESSING_FAILURE: &str = "Failed to process image.";

const FALLBACK_PREFIX: &str = "Prediction: ";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Category {
  Trash,
  Recycle,
  Compost,
}

impl Category {
  pub(crate) const ALL: [Self; 3] = [Self::Trash, Self::Recycle, Self::Compost];

  pub(crate) fn from_label(label: &str) -> Option<Self> {
    match label.to_lowercase().as_str() {
      "trash" => Some(Self::Trash),
      "recycle" => Some(Self::Recycle),
      "compost" => Some(Self::Compost),
      _ => None,
    }
  }

  pub(crate) fn label(self) -> &'static str {
    match self {
      Self::Trash => "trash",
      Self::Recycle => "recycle",
      Self::Compost => "compost",
    }
  }

  /// Word highlighted in the instruction text.
  fn keyword(self) -> &'static str {
    match self {
      Self::Trash => "trash",
      Self::Recycle => "recycling",
      Self::Compost => "compost",
    }
  }

  fn instruction(self) -> &'static str {
    match self {
      Self::Trash => {
        "Your object is trash. Dispose of this object by putting it in the \
         trash can and leaving the trash can at your curb for the local trash \
         services to pick it up."
      }
      Self::Recycle => {
        "Your object is recycling. Dispose of this object by putting it in \
         the recycling bin and leaving the bin at your curb for the local \
         recycling services to pick it up. Make sure to keep the object clean \
         and dry, separate all materials, and flatten and compress."
      }
      Self::Compost => {
        "Your object is compost. You can dispose of this object by adding it \
         to your flower and vegetable beds, window boxes, and container \
         gardens, incorporating it into tree beds, mixing it with potting soil \
         for indoor plants, or spreading it on top of the soil in your yard. \
         Compost can also be used as a soil amendment or as a mulch."
      }
    }
  }
}

/// Text for the result screen.
///
/// `emphasis` holds byte ranges into `text`, each starting and ending on a
/// `char` boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct DisplayMessage {
  pub(crate) text: String,
  pub(crate) emphasis: Vec<Range<usize>>,
  pub(crate) category: Option<Category>,
}

impl DisplayMessage {
  pub(crate) fn error(error: &Error) -> Self {
    Self {
      text: error.user_message(),
      emphasis: Vec::new(),
      category: None,
    }
  }

  /// Splits the text into consecutive segments, flagging emphasized ones.
  pub(crate) fn segments(&self) -> Vec<(&str, bool)> {
    let mut spans = self.emphasis.clone();
    spans.sort_by_key(|span| span.start);

    let mut segments = Vec::new();
    let mut cursor = 0;

    for span in spans {
      if span.start < cursor || span.end > self.text.len() {
        continue;
      }

      if span.start > cursor {
        segments.push((&self.text[cursor..span.start], false));
      }

      segments.push((&self.text[span.clone()], true));
      cursor = span.end;
    }

    if cursor < self.text.len() {
      segments.push((&self.text[cursor..], false));
    }

    segments
  }
}

pub(crate) fn resolve(label: &str) -> DisplayMessage {
  match Category::from_label(label) {
    Some(category) => {
      let text = category.instruction().to_owned();

      let emphasis = find_ignore_case(&text, category.keyword())
        .into_iter()
        .collect();

      DisplayMessage {
        text,
        emphasis,
        category: Some(category),
      }
    }
    None => DisplayMessage {
      text: format!("{FALLBACK_PREFIX}{label}"),
      emphasis: Vec::new(),
      category: None,
    },
  }
}

/// First case-insensitive occurrence of an ASCII `needle` in `haystack`.
///
/// ASCII lowercasing keeps every byte offset in place, so the returned range
/// is valid for the original string.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
  if needle.is_empty() {
    return None;
  }

  let start = haystack
    .to_ascii_lowercase()
    .find(&needle.to_ascii_lowercase())?;

  Some(start..start + needle.len())
}
