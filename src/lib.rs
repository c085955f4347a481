// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Tutka - Injection Context Analysis Engine
 * Classifies input strings into injection contexts and ranks
 * candidate payloads for the detected contexts
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

// Core data model
pub mod errors;
pub mod types;

// Rule evaluation
pub mod rules;

// Knowledge base (rule set + payload catalog)
pub mod builtin;
pub mod catalog;

// Classification pipeline
pub mod classifier;
pub mod scoring;
pub mod suggestions;

// Analysis facade
pub mod engine;
