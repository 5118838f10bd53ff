#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .split_whitespace()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }
        let prefix = args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_connect()
            || cmd.is_disconnect()
            || cmd.is_threshold()
            || cmd.is_interval()
            || cmd.is_toggle()
            || cmd.is_start()
            || cmd.is_sample()
            || cmd.is_save()
            || cmd.is_help()
        {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_connect(&self) -> bool {
        return ["/c", "/connect"].contains(&self.command.as_str());
    }

    pub fn is_disconnect(&self) -> bool {
        return ["/d", "/disconnect"].contains(&self.command.as_str());
    }

    pub fn is_threshold(&self) -> bool {
        return ["/t", "/threshold"].contains(&self.command.as_str());
    }

    pub fn is_interval(&self) -> bool {
        return ["/i", "/interval"].contains(&self.command.as_str());
    }

    pub fn is_toggle(&self) -> bool {
        return ["/w", "/toggle"].contains(&self.command.as_str());
    }

    pub fn is_start(&self) -> bool {
        return ["/s", "/start"].contains(&self.command.as_str());
    }

    pub fn is_sample(&self) -> bool {
        return self.command == "/sample";
    }

    pub fn is_save(&self) -> bool {
        return self.command == "/save";
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }
}
