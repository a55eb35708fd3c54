//! Corpus processor and builder

use crate::{
    config::EngineConfig,
    decode::{ActionScorer, GreedyDecoder},
    error::{EngineError, Result},
    executor::{auto_select, ExecutionMode, Executor, SequentialExecutor},
    replay::{replay_sentence, SentenceTrace},
    scorer::AttachmentScore,
};
use deptrans_core::{GoldTable, LabelVocabulary, ParserState, Sentence, VocabularyBuilder};
use serde::Serialize;
use std::time::Instant;

#[cfg(feature = "parallel")]
use crate::executor::ParallelExecutor;

/// Runs per-sentence jobs over a corpus
#[derive(Debug, Clone, Default)]
pub struct CorpusProcessor {
    config: EngineConfig,
}

/// Oracle replay output with metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReplayOutput {
    /// One trace per replayed sentence, in corpus order
    pub traces: Vec<SentenceTrace>,
    /// Indices of sentences skipped for having no gold arcs
    pub skipped: Vec<usize>,
    /// Replayed trees scored against gold
    pub score: AttachmentScore,
    /// Processing metadata
    pub metadata: ProcessingMetadata,
}

/// Processing metadata
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingMetadata {
    /// Execution mode that was actually used
    pub execution_mode: ExecutionMode,
    /// Worker threads the sentences were spread over
    pub threads: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: f64,
    /// Sentences handed to the processor
    pub sentences: usize,
    /// Tokens handed to the processor, roots excluded
    pub tokens: usize,
}

impl CorpusProcessor {
    /// Create a processor with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom configuration
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Execution mode that will be used for a corpus of `sentence_count`
    pub fn select_mode(&self, sentence_count: usize) -> ExecutionMode {
        let mode = match self.config.execution_mode {
            ExecutionMode::Adaptive => auto_select(sentence_count, self.config.parallel_threshold),
            mode => mode,
        };
        log::debug!("{:?} execution for {} sentences", mode, sentence_count);
        mode
    }

    fn run<T, F>(&self, sentences: &[Sentence], job: F) -> Result<(Vec<T>, ExecutionMode)>
    where
        T: Send,
        F: Fn(usize, &Sentence) -> Result<T> + Send + Sync,
    {
        match self.select_mode(sentences.len()) {
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => {
                let threads = self.config.effective_threads();
                let results = ParallelExecutor::new(Some(threads)).run(sentences, job)?;
                Ok((results, ExecutionMode::Parallel))
            }
            _ => {
                let executor = SequentialExecutor;
                Ok((executor.run(sentences, job)?, executor.mode()))
            }
        }
    }

    fn metadata(&self, mode: ExecutionMode, sentences: &[Sentence], start: Instant) -> ProcessingMetadata {
        let threads = match mode {
            ExecutionMode::Parallel => self.config.effective_threads(),
            _ => 1,
        };
        ProcessingMetadata {
            execution_mode: mode,
            threads,
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            sentences: sentences.len(),
            tokens: sentences.iter().map(|s| s.tokens().len()).sum(),
        }
    }

    /// Replay the oracle over every gold sentence
    pub fn replay(&self, sentences: &[Sentence]) -> Result<ReplayOutput> {
        let start = Instant::now();
        let config = &self.config;
        let (results, mode) =
            self.run(sentences, |index, sentence| replay_sentence(index, sentence, config))?;

        let mut traces = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Some(trace) => traces.push(trace),
                None => skipped.push(index),
            }
        }
        let score: AttachmentScore = traces.iter().map(|trace| &trace.counts).collect();

        log::info!(
            "replayed {} sentences ({} skipped), LAS {:.2}%",
            traces.len(),
            skipped.len(),
            score.las()
        );

        Ok(ReplayOutput {
            traces,
            skipped,
            score,
            metadata: self.metadata(mode, sentences, start),
        })
    }

    /// Count oracle labels over a corpus and freeze them into a vocabulary
    pub fn build_vocabulary(&self, sentences: &[Sentence]) -> Result<LabelVocabulary> {
        let output = self.replay(sentences)?;
        let mut builder = VocabularyBuilder::new();
        for trace in &output.traces {
            builder.extend(&trace.transitions);
        }
        let vocabulary = builder.build();
        log::info!("vocabulary holds {} labels", vocabulary.len());
        Ok(vocabulary)
    }

    /// Score system parses against gold parses of the same corpus
    ///
    /// Both sides must hold the same number of sentences and each sentence
    /// pair the same number of tokens.
    pub fn evaluate(&self, gold: &[Sentence], system: &[Sentence]) -> Result<AttachmentScore> {
        if gold.len() != system.len() {
            return Err(EngineError::LengthMismatch {
                what: "sentence count".to_string(),
                gold: gold.len(),
                system: system.len(),
            });
        }

        let (scores, _) = self.run(gold, |index, gold_sentence| {
            let system_sentence = &system[index];
            if gold_sentence.len() != system_sentence.len() {
                return Err(EngineError::LengthMismatch {
                    what: format!("token count in sentence {index}"),
                    gold: gold_sentence.len() - 1,
                    system: system_sentence.len() - 1,
                });
            }
            let state =
                ParserState::with_gold(system_sentence.clone(), GoldTable::snapshot(gold_sentence));
            let mut score = AttachmentScore::default();
            state.evaluate(&mut score)?;
            Ok(score)
        })?;

        let mut total = AttachmentScore::default();
        for score in &scores {
            total.merge(score);
        }
        log::info!(
            "evaluated {} sentences: LAS {:.2}%, UAS {:.2}%",
            total.sentences,
            total.las(),
            total.uas()
        );
        Ok(total)
    }

    /// Parse every sentence greedily with `scorer`
    pub fn decode<S: ActionScorer + ?Sized>(
        &self,
        sentences: &[Sentence],
        scorer: &S,
        vocabulary: &LabelVocabulary,
    ) -> Result<Vec<Sentence>> {
        let decoder = GreedyDecoder::new(scorer, vocabulary);
        let (parsed, _) = self.run(sentences, |index, sentence| decoder.decode(index, sentence))?;
        Ok(parsed)
    }
}


/// Builder for CorpusProcessor
#[derive(Debug, Default)]
pub struct CorpusProcessorBuilder {
    config: EngineConfig,
}

impl CorpusProcessorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.execution_mode = mode;
        self
    }

    /// Set the thread count
    pub fn threads(mut self, count: Option<usize>) -> Self {
        self.config.threads = count;
        self
    }

    /// Set the sentence count at which adaptive mode goes parallel
    pub fn parallel_threshold(mut self, sentences: usize) -> Self {
        self.config.parallel_threshold = sentences;
        self
    }

    /// Skip or replay sentences without gold arcs
    pub fn skip_degenerate(mut self, skip: bool) -> Self {
        self.config.skip_degenerate = skip;
        self
    }

    /// Fail or carry on when replay misses the gold tree
    pub fn verify_replay(mut self, verify: bool) -> Self {
        self.config.verify_replay = verify;
        self
    }

    /// Use sequential configuration preset
    pub fn sequential(mut self) -> Self {
        self.config = EngineConfig {
            skip_degenerate: self.config.skip_degenerate,
            verify_replay: self.config.verify_replay,
            ..EngineConfig::sequential()
        };
        self
    }

    /// Use parallel configuration preset
    pub fn parallel(mut self) -> Self {
        self.config = EngineConfig {
            threads: self.config.threads,
            skip_degenerate: self.config.skip_degenerate,
            verify_replay: self.config.verify_replay,
            ..EngineConfig::parallel()
        };
        self
    }

    /// Build the processor
    pub fn build(self) -> Result<CorpusProcessor> {
        CorpusProcessor::with_config(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::parse_corpus;

    const CORPUS: &str = "\
1\tThe\t_\t_\t_\t_\t2\tdet\t_\t_
2\tdog\t_\t_\t_\t_\t3\tnsubj\t_\t_
3\tbarks\t_\t_\t_\t_\t0\troot\t_\t_

1\tHello\t_\t_\t_\t_\t_\t_\t_\t_

1\tRun\t_\t_\t_\t_\t0\troot\t_\t_
2\t!\t_\t_\t_\t_\t1\tpunct\t_\t_
";

    #[test]
    fn test_replay_skips_degenerate() {
        let sentences = parse_corpus(CORPUS).unwrap();
        let output = CorpusProcessor::new().replay(&sentences).unwrap();

        assert_eq!(output.traces.len(), 2);
        assert_eq!(output.skipped, vec![1]);
        assert_eq!(output.traces[1].sentence, 2);
        assert_eq!(output.score.total, 5);
        assert_eq!(output.score.las(), 100.0);
        assert_eq!(output.metadata.sentences, 3);
        assert_eq!(output.metadata.tokens, 6);
        assert_eq!(output.metadata.execution_mode, ExecutionMode::Sequential);
    }

    #[test]
    fn test_evaluate_against_system() {
        let gold = parse_corpus(CORPUS).unwrap();
        let mut system = gold.clone();
        system[0].set_head(2, 3, "obj").unwrap();
        system[2].set_head(2, 0, "punct").unwrap();

        let score = CorpusProcessor::new().evaluate(&gold, &system).unwrap();
        assert_eq!(score.sentences, 3);
        assert_eq!(score.total, 6);
        assert_eq!(score.unlabeled, 5);
        assert_eq!(score.labeled, 4);
    }

    #[test]
    fn test_evaluate_rejects_misaligned_corpora() {
        let gold = parse_corpus(CORPUS).unwrap();
        let processor = CorpusProcessor::new();

        assert!(matches!(
            processor.evaluate(&gold, &gold[..2]),
            Err(EngineError::LengthMismatch { gold: 3, system: 2, .. })
        ));

        let mut system = gold.clone();
        system[1].push("extra");
        assert!(matches!(
            processor.evaluate(&gold, &system),
            Err(EngineError::LengthMismatch { gold: 1, system: 2, .. })
        ));
    }

    #[test]
    fn test_builder() {
        let processor = CorpusProcessorBuilder::new()
            .threads(Some(2))
            .parallel_threshold(10)
            .verify_replay(false)
            .build()
            .unwrap();
        assert_eq!(processor.config().threads, Some(2));
        assert_eq!(processor.config().parallel_threshold, 10);
        assert!(!processor.config().verify_replay);
        assert_eq!(processor.select_mode(5), ExecutionMode::Sequential);

        let sequential = CorpusProcessorBuilder::new().sequential().build().unwrap();
        assert_eq!(sequential.select_mode(10_000), ExecutionMode::Sequential);

        assert!(CorpusProcessorBuilder::new().threads(Some(0)).build().is_err());
    }
}
