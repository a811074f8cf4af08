use thiserror::Error;

/// Erreurs terminales de pixscii. Aucune n'est réessayée — chaque variante
/// provoque la fin de l'invocation courante avec un code de sortie non nul.
#[derive(Error, Debug)]
pub enum PixError {
    /// No input file was given on the command line.
    #[error("Aucun fichier d'entrée spécifié. Utilisez --file chemin/vers/image.(png|jpg|gif)")]
    InputMissing,

    /// The input file could not be read.
    #[error("Lecture impossible : {path}")]
    FileUnreadable {
        /// Path that could not be read.
        path: String,
        /// Underlying io error.
        #[source]
        source: std::io::Error,
    },

    /// The input bytes could not be decoded as an image or GIF.
    #[error("Image indécodable : {path} ({reason})")]
    Undecodable {
        /// Path of the offending file.
        path: String,
        /// Decoder message.
        reason: String,
    },

    /// The output could not be written.
    #[error("Écriture impossible : {path}")]
    WriteFailure {
        /// Destination path (`<stdout>` for standard output).
        path: String,
        /// Underlying io error.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_short_and_named() {
        let e = PixError::Undecodable {
            path: "x.png".into(),
            reason: "format inconnu".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("x.png"));
        assert!(msg.contains("format inconnu"));
    }
}
